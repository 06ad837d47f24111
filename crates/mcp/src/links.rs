// Rewrites community-relative links in API bodies to absolute URLs

use serde_json::Value;
use url::Url;

/// Resolves `url` fields such as `/topic/42-title` against the public
/// community address so agents can hand them to users directly. A path
/// prefix on the address (`https://host/community`) is kept.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base: Url,
}

impl LinkResolver {
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Walk the body and rewrite every relative `url` string in place.
    pub fn resolve(&self, value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, field) in map.iter_mut() {
                    if key == "url" {
                        if let Value::String(link) = field {
                            if let Some(absolute) = self.absolute(link) {
                                *link = absolute;
                            }
                            continue;
                        }
                    }
                    self.resolve(field);
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.resolve(item);
                }
            }
            _ => {}
        }
    }

    fn absolute(&self, link: &str) -> Option<String> {
        // "//host/path" is protocol-relative, not community-relative
        if !link.starts_with('/') || link.starts_with("//") {
            return None;
        }
        self.base
            .join(link.trim_start_matches('/'))
            .ok()
            .map(String::from)
    }
}
