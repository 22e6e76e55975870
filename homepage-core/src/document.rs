//! The persisted document and the section names the site uses.

use serde_json::{Map, Value};

/// The root of the persisted document: section name -> section value.
pub type Document = Map<String, Value>;

/// Section keys used by the homepage front-end.
///
/// Nothing enforces these; any key may be stored.
pub mod sections {
    pub const PROFILE: &str = "profile";
    pub const CONTACT: &str = "contact";
    pub const SKILLS: &str = "skills";
    pub const PROJECTS: &str = "projects";
    pub const FRIEND_LINKS: &str = "friendLinks";
    pub const SOCIAL_LINKS: &str = "socialLinks";
    pub const MUSIC: &str = "music";
    pub const BACKGROUND: &str = "background";
}
