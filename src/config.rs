use crate::error::Result;
use log::LevelFilter;
use serde::de::Deserializer;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GalleryConfig {
    pub listing: Listing,
    pub ui: Ui,
    pub logging: Logging,
    pub keybindings: Keybindings,
}

impl GalleryConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BindingList(pub Vec<String>);

impl<'de> Deserialize<'de> for BindingList {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrVec {
            String(String),
            Vec(Vec<String>),
        }

        match StringOrVec::deserialize(deserializer)? {
            StringOrVec::String(s) => {
                if s.eq_ignore_ascii_case("none") {
                    Ok(BindingList(vec![]))
                } else {
                    Ok(BindingList(vec![s]))
                }
            }
            StringOrVec::Vec(v) => Ok(BindingList(v)),
        }
    }
}

impl<I, S> From<I> for BindingList
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from(iter: I) -> Self {
        BindingList(iter.into_iter().map(|s| s.into()).collect())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Listing {
    /// Resolved against the page URL.
    pub path: String,
    /// Leading `/`-separated segments dropped from each resolved link.
    pub strip_segments: usize,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            path: "/zeke/img/index.html".into(),
            strip_segments: 4,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Ui {
    pub title_format: String,
    pub first_link: String,
    pub prev_link: String,
    pub next_link: String,
    pub last_link: String,
    pub image: String,
    pub video: String,
    pub status: String,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            title_format: "Zeke gallery: %n".into(),
            first_link: "first".into(),
            prev_link: "prev".into(),
            next_link: "next".into(),
            last_link: "last".into(),
            image: "main".into(),
            video: "alt".into(),
            status: "gallery-status".into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Logging {
    pub enabled: bool,
    pub level: LevelFilter,
    pub quiet_hosts: Vec<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Debug,
            quiet_hosts: vec!["kaltfam.net".into()],
        }
    }
}

impl Logging {
    pub fn enabled_for_host(&self, host: &str) -> bool {
        self.enabled && !self.quiet_hosts.iter().any(|h| h == host)
    }

    pub fn effective_level(&self, host: &str) -> LevelFilter {
        if self.enabled_for_host(host) {
            self.level
        } else {
            LevelFilter::Off
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keybindings {
    pub next: BindingList,
    pub previous: BindingList,
    pub first: BindingList,
    pub last: BindingList,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            next: vec!["Enter", "Right"].into(),
            previous: vec!["Left"].into(),
            first: BindingList::default(),
            last: BindingList::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_zeke_page() {
        let config = GalleryConfig::default();
        assert_eq!(config.listing.path, "/zeke/img/index.html");
        assert_eq!(config.listing.strip_segments, 4);
        assert_eq!(config.ui.title_format, "Zeke gallery: %n");
        assert_eq!(config.ui.image, "main");
        assert_eq!(config.ui.video, "alt");
        assert_eq!(config.keybindings.next.0, vec!["Enter", "Right"]);
        assert!(config.keybindings.first.0.is_empty());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GalleryConfig::from_toml(
            r#"
            [ui]
            title_format = "Photos: %n (%i/%t)"

            [keybindings]
            first = "Home"
            next = "none"
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.title_format, "Photos: %n (%i/%t)");
        assert_eq!(config.ui.first_link, "first");
        assert_eq!(config.keybindings.first.0, vec!["Home"]);
        assert!(config.keybindings.next.0.is_empty());
        assert_eq!(config.keybindings.previous.0, vec!["Left"]);
        assert_eq!(config.listing.strip_segments, 4);
    }

    #[test]
    fn logging_level_and_hosts_parse() {
        let config = GalleryConfig::from_toml(
            r#"
            [logging]
            level = "warn"
            quiet_hosts = ["example.org"]
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, LevelFilter::Warn);
        assert!(config.logging.enabled_for_host("localhost:8000"));
        assert!(!config.logging.enabled_for_host("example.org"));
        assert_eq!(config.logging.effective_level("example.org"), LevelFilter::Off);
    }

    #[test]
    fn default_logging_is_quiet_on_the_public_host() {
        let logging = Logging::default();
        assert_eq!(logging.effective_level("localhost"), LevelFilter::Debug);
        assert_eq!(logging.effective_level("kaltfam.net"), LevelFilter::Off);

        let disabled = Logging {
            enabled: false,
            ..Logging::default()
        };
        assert!(!disabled.enabled_for_host("localhost"));
    }

    #[test]
    fn broken_toml_is_a_config_error() {
        let err = GalleryConfig::from_toml("[ui\ntitle_format = 3").unwrap_err();
        assert!(matches!(err, crate::error::GalleryError::Config(_)));
    }
}
