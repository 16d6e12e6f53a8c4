use std::fmt;

use serde::{Deserialize, Serialize};

/// Preview rendering mode, persisted only as the `view` URL query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Combined two-pane layout, desktop and mobile side by side.
    All,
    Desktop,
    Mobile,
}

impl ViewMode {
    /// Desktop pane width in logical pixels.
    pub const DESKTOP_WIDTH: u32 = 700;
    /// Mobile pane width in logical pixels.
    pub const MOBILE_WIDTH: u32 = 390;
    /// Shared iframe height.
    pub const FRAME_HEIGHT: u32 = 900;
    /// Viewports narrower than this never render the two-pane layout.
    pub const BREAKPOINT_WIDTH: u32 = 768;

    pub fn all() -> &'static [ViewMode] {
        use ViewMode::*;
        &[All, Desktop, Mobile]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::All => "all",
            ViewMode::Desktop => "desktop",
            ViewMode::Mobile => "mobile",
        }
    }

    pub fn parse(value: &str) -> Option<ViewMode> {
        match value {
            "all" => Some(ViewMode::All),
            "desktop" => Some(ViewMode::Desktop),
            "mobile" => Some(ViewMode::Mobile),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::All => "All",
            ViewMode::Desktop => "Desktop",
            ViewMode::Mobile => "Mobile",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which route family served a viewer request. Internal routes sit behind
/// the access guard; public routes are shared directly with clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Internal,
    Public,
}

/// Resolve the mode a viewer starts in.
///
/// A valid `view` query parameter always wins (after viewport coercion).
/// Otherwise public viewers default to a single desktop pane and internal
/// viewers to the combined layout; narrow viewports start on mobile either
/// way.
pub fn resolve_mode(query: Option<&str>, route: RouteClass, narrow: bool) -> ViewMode {
    if let Some(mode) = query.and_then(ViewMode::parse) {
        return coerce_for_viewport(mode, narrow);
    }
    if narrow {
        return ViewMode::Mobile;
    }
    match route {
        RouteClass::Public => ViewMode::Desktop,
        RouteClass::Internal => ViewMode::All,
    }
}

/// The combined layout is never rendered below the breakpoint; `all` on a
/// narrow viewport becomes `mobile`. Single-pane modes are left alone.
pub fn coerce_for_viewport(mode: ViewMode, narrow: bool) -> ViewMode {
    match (mode, narrow) {
        (ViewMode::All, true) => ViewMode::Mobile,
        (mode, _) => mode,
    }
}

/// Write `mode` into an existing query string, replacing any previous
/// `view` parameter and preserving everything else in place. The result is
/// what a viewer writes back via history replacement, so the current view
/// stays link-shareable.
pub fn write_mode_to_query(query: &str, mode: ViewMode) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut wrote_view = false;
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        if pair == "view" || pair.starts_with("view=") {
            if !wrote_view {
                parts.push(format!("view={}", mode.as_str()));
                wrote_view = true;
            }
        } else {
            parts.push(pair.to_string());
        }
    }
    if !wrote_view {
        parts.push(format!("view={}", mode.as_str()));
    }
    parts.join("&")
}

/// Strip the access key from a query string, for internal-to-public
/// redirects: the public route is the same resource minus the key.
pub fn strip_key_param(query: &str) -> String {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| *pair != "key" && !pair.starts_with("key="))
        .collect::<Vec<_>>()
        .join("&")
}
