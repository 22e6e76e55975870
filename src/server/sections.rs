//! Sections exposed under `/api/{section}`.

use homepage_core::sections;
use serde_json::Value;

/// How a section is edited over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    /// Replaced wholesale with `PUT /api/{section}`.
    Scalar,
    /// Edited item by item with `POST /api/{section}` and `/api/{section}/{index}`.
    List,
}

/// Sections the site front-end reads and edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownSection {
    Profile,
    Contact,
    Skills,
    Projects,
    FriendLinks,
    SocialLinks,
    Music,
    Background,
}

impl KnownSection {
    pub const ALL: [KnownSection; 8] = [
        KnownSection::Profile,
        KnownSection::Contact,
        KnownSection::Skills,
        KnownSection::Projects,
        KnownSection::FriendLinks,
        KnownSection::SocialLinks,
        KnownSection::Music,
        KnownSection::Background,
    ];

    /// Parse from the URL path segment.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "profile" => Some(KnownSection::Profile),
            "contact" => Some(KnownSection::Contact),
            "skills" => Some(KnownSection::Skills),
            "projects" => Some(KnownSection::Projects),
            "friendlinks" => Some(KnownSection::FriendLinks),
            "sociallinks" => Some(KnownSection::SocialLinks),
            "music" => Some(KnownSection::Music),
            "background" => Some(KnownSection::Background),
            _ => None,
        }
    }

    /// Returns the key this section is stored under in the document.
    pub fn key(&self) -> &'static str {
        match self {
            KnownSection::Profile => sections::PROFILE,
            KnownSection::Contact => sections::CONTACT,
            KnownSection::Skills => sections::SKILLS,
            KnownSection::Projects => sections::PROJECTS,
            KnownSection::FriendLinks => sections::FRIEND_LINKS,
            KnownSection::SocialLinks => sections::SOCIAL_LINKS,
            KnownSection::Music => sections::MUSIC,
            KnownSection::Background => sections::BACKGROUND,
        }
    }

    pub fn shape(&self) -> SectionShape {
        match self {
            KnownSection::Skills | KnownSection::Projects | KnownSection::FriendLinks => {
                SectionShape::List
            }
            _ => SectionShape::Scalar,
        }
    }

    /// Human-readable name used in response messages.
    pub fn label(&self) -> &'static str {
        match self {
            KnownSection::Profile => "Profile",
            KnownSection::Contact => "Contact info",
            KnownSection::Skills => "Skills",
            KnownSection::Projects => "Projects",
            KnownSection::FriendLinks => "Friend links",
            KnownSection::SocialLinks => "Social links",
            KnownSection::Music => "Music settings",
            KnownSection::Background => "Background settings",
        }
    }

    /// Human-readable name of a single item of a list section.
    pub fn item_label(&self) -> &'static str {
        match self {
            KnownSection::Skills => "Skill",
            KnownSection::Projects => "Project",
            KnownSection::FriendLinks => "Friend link",
            _ => "Item",
        }
    }

    /// Value reported for a section that isn't stored yet.
    ///
    /// Social links are a list on the front-end even though they are
    /// replaced wholesale.
    pub fn empty_value(&self) -> Value {
        match (self.shape(), self) {
            (SectionShape::List, _) | (_, KnownSection::SocialLinks) => Value::Array(Vec::new()),
            _ => Value::Null,
        }
    }
}
