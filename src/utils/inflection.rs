use std::fmt;

use heck::ToSnakeCase;
use heck::ToTitleCase;
use heck::ToUpperCamelCase;

// Model names come in as `Namespace::ModelName`, table and file names as `namespace/model_names`. These
// are the handful of transformations that are needed to get from one to the other.

const NAMESPACE_SEPARATOR: &str = "::";

pub(crate) struct AsTitleCase<StringType: AsRef<str>>(StringType);

impl<T: AsRef<str>> fmt::Display for AsTitleCase<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        let underscored = self.0.as_ref().underscore();
        // foreign keys are described by the thing they point to
        let humanized = match underscored.strip_suffix("_id") {
            Some(stripped) if !stripped.is_empty() => stripped,
            Some(_) | None => &underscored,
        };

        for (i,segment) in humanized.split('/').enumerate() {
            if i > 0 {
                write!(f,"/")?;
            }
            write!(f,"{}",segment.to_title_case())?;
        }

        Ok(())
    }
}

fn is_vowel(char: char) -> bool {
    matches!(char,'a' | 'e' | 'i' | 'o' | 'u')
}

// Only regular English plurals. Anything irregular should be given an explicit table name in the metadata.
fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return word.to_owned()
    }
    if let Some(stem) = word.strip_suffix('y') {
        if stem.chars().last().is_some_and(|last| !is_vowel(last)) {
            return format!("{}ies",stem)
        }
    }
    if word.ends_with('s') || word.ends_with('x') || word.ends_with('z') || word.ends_with("ch") || word.ends_with("sh") {
        format!("{}es",word)
    } else {
        format!("{}s",word)
    }
}

pub(crate) trait Inflect {

    /// `created_at` -> `Created At`, `Admin::BlogPost` -> `Admin/Blog Post`
    fn titleize(&self) -> String;

    /// `Admin::BlogPost` -> `admin/blog_post`
    fn underscore(&self) -> String;

    /// `blog_posts` -> `BlogPosts`
    fn camelize(&self) -> String;

    /// Pluralizes the last word.
    fn pluralize(&self) -> String;

    /// `Admin::BlogPost` -> `admin/blog_posts`
    fn tableize(&self) -> String;

}

impl Inflect for str {

    fn titleize(&self) -> String {
        AsTitleCase(self).to_string()
    }

    fn underscore(&self) -> String {
        self.split(NAMESPACE_SEPARATOR).map(ToSnakeCase::to_snake_case).collect::<Vec<_>>().join("/")
    }

    fn camelize(&self) -> String {
        self.split('/').map(ToUpperCamelCase::to_upper_camel_case).collect::<Vec<_>>().join(NAMESPACE_SEPARATOR)
    }

    fn pluralize(&self) -> String {
        let (head,last) = match self.rfind(['/','_']) {
            Some(index) => self.split_at(index + 1),
            None => ("",self)
        };
        format!("{}{}",head,pluralize_word(last))
    }

    fn tableize(&self) -> String {
        self.underscore().pluralize()
    }

}
