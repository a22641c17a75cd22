use indexmap::IndexMap;
use serde::Serialize;

use crate::progress::ProgressObserver;
use crate::routes::ActionRequirement;
use crate::routes::RouteDescriptor;

/// Resources whose routes never become links: authentication, session handling and administration.
pub(crate) const EXCLUDED_CONTROLLERS: [&str; 4] = ["passwords","sessions","users","admin"];

/// Actions that only serve html forms.
pub(crate) const EXCLUDED_ACTIONS: [&str; 2] = ["edit","new"];

const FORMAT_SUFFIX: &str = "(.:format)";

#[derive(Debug,Clone,PartialEq,Eq,Serialize)]
pub(crate) struct LinkDescriptor {
    pub(crate) rel: String,
    pub(crate) method: String,
    pub(crate) href: String,
}

const IDENTITY_PLACEHOLDER: &str = ":id";

fn is_name_char(char: char) -> bool {
    char.is_ascii_alphanumeric() || char == '_'
}

/// `/articles/:article_id/comments/:id(.:format)` -> `/articles/:article_id/comments/{id}`
pub(crate) fn link_href(path: &str) -> String {
    let path = path.replace(FORMAT_SUFFIX, "");
    let mut result = String::with_capacity(path.len());
    let mut rest = path.as_str();
    while let Some(index) = rest.find(IDENTITY_PLACEHOLDER) {
        let (head,tail) = rest.split_at(index);
        let after = &tail[IDENTITY_PLACEHOLDER.len()..];
        result.push_str(head);
        // only the whole `:id` token, `:id_token` is some other placeholder
        if after.starts_with(is_name_char) {
            result.push_str(IDENTITY_PLACEHOLDER);
        } else {
            result.push_str("{id}");
        }
        rest = after;
    }
    result.push_str(rest);
    result
}

/// `^GET$` -> `GET`
pub(crate) fn link_method(verb: &str) -> String {
    verb.chars().filter(|char| !matches!(char,'^' | '$')).collect()
}

fn is_excluded_controller(controller: &str) -> bool {
    // any mention counts, so `admin/articles` and `user_sessions` are both skipped
    EXCLUDED_CONTROLLERS.iter().any(|excluded| controller.contains(excluded))
}

fn is_excluded_action(action: Option<&ActionRequirement>) -> bool {
    match action {
        Some(ActionRequirement::Any(actions)) => actions.iter().any(|action| EXCLUDED_ACTIONS.contains(&action.as_str())),
        Some(ActionRequirement::One(_)) | None => false,
    }
}

/// Links for each resource, keyed by controller name, in route declaration order.
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub(crate) struct LinkIndex {
    resources: IndexMap<String,Vec<LinkDescriptor>>
}

impl LinkIndex {

    pub(crate) fn build<Progress: ProgressObserver>(routes: &[RouteDescriptor], progress: &Progress) -> Self {

        let mut resources: IndexMap<String,Vec<LinkDescriptor>> = IndexMap::new();

        for route in routes {
            let requirements = &route.requirements;
            if requirements.is_empty() {
                continue;
            }
            let Some(controller) = &requirements.controller else {
                progress.warning(|| format!("Route '{}' has no controller, it will not be linked.",route.path));
                continue;
            };
            if is_excluded_controller(controller) || is_excluded_action(requirements.action.as_ref()) {
                continue;
            }

            let rel = requirements.action.as_ref().map(ActionRequirement::rel).unwrap_or_default();
            let links = resources.entry(controller.clone()).or_default();
            if links.iter().any(|link| link.rel == rel) {
                continue;
            }
            links.push(LinkDescriptor {
                rel,
                method: link_method(&route.verb),
                href: link_href(&route.path),
            })
        }

        Self {
            resources
        }

    }

    pub(crate) fn get(&self, resource: &str) -> Option<&[LinkDescriptor]> {
        self.resources.get(resource).map(Vec::as_slice)
    }

    #[cfg(test)] pub(crate) fn len(&self) -> usize {
        self.resources.len()
    }

}

#[cfg(test)]
mod test {

    use serde_json::json;

    use super::link_href;
    use super::link_method;
    use super::LinkDescriptor;
    use super::LinkIndex;
    use crate::routes::RouteDescriptor;

    fn routes(value: serde_json::Value) -> Vec<RouteDescriptor> {
        serde_json::from_value(value).unwrap()
    }

    fn link(rel: &str, method: &str, href: &str) -> LinkDescriptor {
        LinkDescriptor {
            rel: rel.to_owned(),
            method: method.to_owned(),
            href: href.to_owned()
        }
    }

    #[test]
    fn test_href_and_method() {
        assert_eq!(link_href("/articles/:id(.:format)"),"/articles/{id}");
        assert_eq!(link_href("/articles(.:format)"),"/articles");
        assert_eq!(link_href("/articles/:article_id/comments/:id(.:format)"),"/articles/:article_id/comments/{id}");
        assert_eq!(link_href("/articles/:slug(.:format)"),"/articles/:slug");
        assert_eq!(link_href("/articles/:id_token/:id/edit"),"/articles/:id_token/{id}/edit");
        assert_eq!(link_href("/files/*path"),"/files/*path");
        assert_eq!(link_href(""),"");
        assert_eq!(link_method("^GET$"),"GET");
        assert_eq!(link_method("^(PATCH|PUT)$"),"(PATCH|PUT)");
        assert_eq!(link_method(""),"");
    }

    #[test]
    fn test_article_links() {
        let index = LinkIndex::build(&routes(json!([
            {"requirements": {"controller": "articles", "action": "index"}, "verb": "^GET$", "path": "/articles(.:format)"},
            {"requirements": {"controller": "articles", "action": "create"}, "verb": "^POST$", "path": "/articles(.:format)"},
            {"requirements": {"controller": "articles", "action": "show"}, "verb": "^GET$", "path": "/articles/:id(.:format)"},
            {"requirements": {"controller": "articles", "action": "show"}, "verb": "^GET$", "path": "/posts/:id(.:format)"}
        ])), &());

        assert_eq!(index.len(),1);
        assert_eq!(index.get("articles").unwrap(),&[
            link("index","GET","/articles"),
            link("create","POST","/articles"),
            link("show","GET","/articles/{id}"),
        ]);
        assert_eq!(index.get("comments"),None);
    }

    #[test]
    fn test_first_declared_route_wins() {
        let index = LinkIndex::build(&routes(json!([
            {"requirements": {"controller": "articles", "action": "update"}, "verb": "^PATCH$", "path": "/articles/:id(.:format)"},
            {"requirements": {"controller": "articles", "action": "update"}, "verb": "^PUT$", "path": "/articles/:id(.:format)"}
        ])), &());
        assert_eq!(index.get("articles").unwrap(),&[link("update","PATCH","/articles/{id}")]);
    }

    #[test]
    fn test_excluded_routes() {
        let index = LinkIndex::build(&routes(json!([
            {"requirements": {}, "verb": "", "path": "/*path"},
            {"requirements": {"action": "index"}, "verb": "^GET$", "path": "/redirect"},
            {"requirements": {"controller": "sessions", "action": "create"}, "verb": "^POST$", "path": "/login"},
            {"requirements": {"controller": "admin/articles", "action": "index"}, "verb": "^GET$", "path": "/admin/articles"},
            {"requirements": {"controller": "users", "action": "show"}, "verb": "^GET$", "path": "/users/:id"},
            {"requirements": {"controller": "admin_users", "action": "index"}, "verb": "^GET$", "path": "/admin_users"},
            {"requirements": {"controller": "user_sessions", "action": "create"}, "verb": "^POST$", "path": "/user_sessions"},
            {"requirements": {"controller": "comments", "action": ["new", "create"]}, "verb": "^GET$", "path": "/comments/new"},
            {"requirements": {"controller": "comments", "action": "edit"}, "verb": "^GET$", "path": "/comments/:id/edit"}
        ])), &());

        assert_eq!(index.len(),1);
        assert_eq!(index.get("comments").unwrap(),&[link("edit","GET","/comments/{id}/edit")]);
    }

    #[test]
    fn test_malformed_route() {
        let index = LinkIndex::build(&routes(json!([
            {"requirements": {"controller": "tags"}}
        ])), &());
        assert_eq!(index.get("tags").unwrap(),&[link("","","")]);
    }

}
