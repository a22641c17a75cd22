use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::CommandError;
use crate::progress::ProgressObserver;

#[derive(Debug,Clone,PartialEq,Eq,Deserialize,JsonSchema)]
#[serde(untagged)]
/// The action constraint of a route, either one action name or a set of allowed action names.
pub(crate) enum ActionRequirement {
    One(String),
    Any(Vec<String>)
}

impl ActionRequirement {

    pub(crate) fn rel(&self) -> String {
        match self {
            Self::One(action) => action.clone(),
            Self::Any(actions) => actions.join("|"),
        }
    }
}

#[derive(Debug,Clone,Default,Deserialize,JsonSchema)]
/// The controller and action constraints of a route.
pub(crate) struct RouteRequirements {
    #[serde(default)]
    /// The controller handling the route, namespaced controllers use `/`
    pub(crate) controller: Option<String>,
    #[serde(default)]
    /// The action or actions handling the route
    pub(crate) action: Option<ActionRequirement>,
}

impl RouteRequirements {

    pub(crate) const fn is_empty(&self) -> bool {
        self.controller.is_none() && self.action.is_none()
    }
}

#[derive(Debug,Clone,Default,Deserialize,JsonSchema)]
/// One entry in the application's route table.
pub(crate) struct RouteDescriptor {
    #[serde(default)]
    /// Controller and action constraints, routes without any are ignored
    pub(crate) requirements: RouteRequirements,
    #[serde(default)]
    /// The HTTP verb matcher, anchors such as `^GET$` are allowed
    pub(crate) verb: String,
    #[serde(default)]
    /// The path pattern, such as `/articles/:id(.:format)`
    pub(crate) path: String,
}

/// Loads the route table. A missing file is an empty table, and entries that can't be understood are skipped with a warning.
pub(crate) fn load_routes<Progress: ProgressObserver>(routes_path: &Path, progress: &mut Progress) -> Result<Vec<RouteDescriptor>,CommandError> {

    if !routes_path.exists() {
        progress.warning(|| format!("Route table '{}' not found, schemas will not have links.",routes_path.display()));
        return Ok(Vec::new())
    }

    let file = File::open(routes_path).map_err(|e| CommandError::RouteSourceRead(format!("{}",e)))?;
    let entries = serde_json::from_reader::<_,Vec<Value>>(BufReader::new(file)).map_err(|e| CommandError::RouteSourceRead(format!("{}",e)))?;

    let mut routes = Vec::with_capacity(entries.len());
    for (i,entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RouteDescriptor>(entry) {
            Ok(route) => routes.push(route),
            Err(err) => progress.warning(|| format!("Skipping malformed route #{}: {}",i,err)),
        }
    }

    Ok(routes)

}

#[cfg(test)]
mod test {

    use std::fs;

    use tempfile::TempDir;

    use super::ActionRequirement;
    use super::load_routes;
    use crate::errors::CommandError;

    #[test]
    fn test_load_routes() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("routes.json");
        fs::write(&file, r#"[
            {"requirements": {"controller": "articles", "action": "show"}, "verb": "^GET$", "path": "/articles/:id(.:format)"},
            {"requirements": {"controller": "articles", "action": ["index", "search"]}, "path": "/articles"},
            {"requirements": {}, "verb": "", "path": "/*path"},
            {"verb": 42}
        ]"#).unwrap();

        let routes = load_routes(&file, &mut ()).unwrap();
        assert_eq!(routes.len(),3);
        assert_eq!(routes[0].requirements.action,Some(ActionRequirement::One("show".to_owned())));
        assert_eq!(routes[1].requirements.action.as_ref().map(ActionRequirement::rel),Some("index|search".to_owned()));
        assert_eq!(routes[1].verb,"");
        assert!(routes[2].requirements.is_empty());
    }

    #[test]
    fn test_missing_and_broken_routes() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("routes.json");
        assert!(load_routes(&file, &mut ()).unwrap().is_empty());

        fs::write(&file, "{").unwrap();
        assert!(matches!(load_routes(&file, &mut ()),Err(CommandError::RouteSourceRead(_))));
    }

}
