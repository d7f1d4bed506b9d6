/*!
 * Clip asset resolution.
 *
 * Clip identifiers are file names relative to an asset base, which is either an
 * http(s) URL or a local directory. Existence is never checked up front; a clip
 * that can't be fetched surfaces later as a clip playback fault.
 */

use anyhow::{Result, anyhow};
use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::errors::ClipPlaybackError;

use super::model::ClipId;

/// Where a clip's media lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipLocation {
    Url(Url),
    Path(PathBuf),
}

impl fmt::Display for ClipLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipLocation::Url(url) => write!(f, "{}", url),
            ClipLocation::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A clip identifier paired with its media location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClip {
    pub id: ClipId,
    pub location: ClipLocation,
}

#[derive(Debug, Clone)]
enum AssetBase {
    Remote(Url),
    Local(PathBuf),
}

/// Maps clip identifiers onto the configured asset base
#[derive(Debug, Clone)]
pub struct ClipResolver {
    base: AssetBase,
}

impl ClipResolver {
    /// Create a resolver for an asset base such as `/videos/` or `https://cdn.example/isl/`
    pub fn new(asset_base: &str) -> Result<Self> {
        let asset_base = asset_base.trim();
        if asset_base.is_empty() {
            return Err(anyhow!("Clip asset base must not be empty"));
        }

        let base = if asset_base.starts_with("http://") || asset_base.starts_with("https://") {
            // Url::join drops the last path segment unless the base ends with '/'
            let normalized = if asset_base.ends_with('/') {
                asset_base.to_string()
            } else {
                format!("{}/", asset_base)
            };
            let url = Url::parse(&normalized)
                .map_err(|e| anyhow!("Invalid clip asset URL '{}': {}", asset_base, e))?;
            AssetBase::Remote(url)
        } else {
            AssetBase::Local(PathBuf::from(asset_base))
        };

        Ok(Self { base })
    }

    /// Resolve a clip identifier to its media location
    pub fn resolve(&self, clip: &ClipId) -> Result<ResolvedClip, ClipPlaybackError> {
        let id = clip.as_str();
        // A ':' would let the id name its own scheme or drive and escape the base
        if id.is_empty()
            || id.starts_with(['/', '\\'])
            || id.contains(':')
            || id.split(['/', '\\']).any(|part| part == "..")
        {
            return Err(ClipPlaybackError {
                clip: clip.clone(),
                message: "clip identifier is not a relative asset name".to_string(),
            });
        }

        let location = match &self.base {
            AssetBase::Remote(base) => {
                let url = base.join(id).map_err(|e| ClipPlaybackError {
                    clip: clip.clone(),
                    message: e.to_string(),
                })?;
                if !url.as_str().starts_with(base.as_str()) {
                    return Err(ClipPlaybackError {
                        clip: clip.clone(),
                        message: format!("clip resolves outside the asset base {}", base),
                    });
                }
                ClipLocation::Url(url)
            }
            AssetBase::Local(dir) => ClipLocation::Path(dir.join(id)),
        };

        Ok(ResolvedClip {
            id: clip.clone(),
            location,
        })
    }
}
