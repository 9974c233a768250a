//! Memory dialog state
//!
//! Holds what the dialog shows and where its fade animation is. The DOM
//! view in the web entry point mirrors this state every frame; nothing here
//! touches the browser.

use serde::{Deserialize, Serialize};

use crate::sim::InteractionEvent;

pub const DEFAULT_TITLE: &str = "Memory";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";
pub const CLOSE_LABEL: &str = "Fechar";

/// Seconds for a full fade in or out
pub const FADE_DURATION: f32 = 0.3;
/// Content scale when fully faded out
pub const HIDDEN_CONTENT_SCALE: f32 = 0.8;
/// Darkness of the backdrop behind the dialog
pub const BACKDROP_ALPHA: f32 = 0.5;
pub const CONTENT_MAX_WIDTH_PX: u32 = 500;
pub const CLOSE_BUTTON_COLOR: &str = "#4a5568";
pub const CLOSE_BUTTON_HOVER_COLOR: &str = "#2d3748";

/// Content handed to [`Modal::show`]; either field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalDetails {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<&InteractionEvent> for ModalDetails {
    fn from(event: &InteractionEvent) -> Self {
        Self {
            title: Some(event.title.clone()),
            description: Some(event.description.clone()),
        }
    }
}

/// Where the show/hide animation currently is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    Hidden,
    /// `progress` runs 0 -> 1
    FadingIn { progress: f32 },
    Shown,
    /// `progress` runs 1 -> 0
    FadingOut { progress: f32 },
}

/// Single re-usable memory dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modal {
    visible: bool,
    title: String,
    description: String,
    transition: Transition,
}

impl Default for Modal {
    fn default() -> Self {
        Self::new()
    }
}

impl Modal {
    pub fn new() -> Self {
        Self {
            visible: false,
            title: String::new(),
            description: String::new(),
            transition: Transition::Hidden,
        }
    }

    /// Show (or replace) the dialog content
    pub fn show(&mut self, details: &ModalDetails) {
        self.title = non_empty(details.title.as_deref())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();
        self.description = non_empty(details.description.as_deref())
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string();

        if !self.visible {
            let progress = self.progress();
            self.transition = Transition::FadingIn { progress };
        }
        self.visible = true;
        log::debug!("Modal shown: {}", self.title);
    }

    pub fn hide(&mut self) {
        if self.visible {
            let progress = self.progress();
            self.transition = Transition::FadingOut { progress };
            log::debug!("Modal hidden");
        }
        self.visible = false;
    }

    /// Route a key press. Escape closes a visible dialog; returns whether
    /// the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if self.visible && key == "Escape" {
            self.hide();
            return true;
        }
        false
    }

    /// Advance the fade animation
    pub fn update(&mut self, dt: f32) {
        let step = if FADE_DURATION > 0.0 {
            dt.max(0.0) / FADE_DURATION
        } else {
            1.0
        };
        self.transition = match self.transition {
            Transition::FadingIn { progress } => {
                let progress = progress + step;
                if progress >= 1.0 {
                    Transition::Shown
                } else {
                    Transition::FadingIn { progress }
                }
            }
            Transition::FadingOut { progress } => {
                let progress = progress - step;
                if progress <= 0.0 {
                    Transition::Hidden
                } else {
                    Transition::FadingOut { progress }
                }
            }
            settled => settled,
        };
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the dialog element should be on screen at all (true until a
    /// fade-out finishes)
    pub fn is_displayed(&self) -> bool {
        self.transition != Transition::Hidden
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    fn progress(&self) -> f32 {
        match self.transition {
            Transition::Hidden => 0.0,
            Transition::Shown => 1.0,
            Transition::FadingIn { progress } | Transition::FadingOut { progress } => progress,
        }
    }

    /// Backdrop opacity (0-1)
    pub fn opacity(&self) -> f32 {
        self.progress().clamp(0.0, 1.0)
    }

    /// Scale of the content box (0.8 hidden, 1.0 shown)
    pub fn content_scale(&self) -> f32 {
        HIDDEN_CONTENT_SCALE + (1.0 - HIDDEN_CONTENT_SCALE) * self.opacity()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Sizing for the dialog box at a given viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    /// Content width as a percentage of the viewport
    pub width_percent: u32,
    pub padding_px: u32,
    pub title_font_px: u32,
    pub body_font_px: u32,
}

impl ModalLayout {
    /// Viewports at or below this width use the compact layout
    pub const MOBILE_BREAKPOINT: f64 = 600.0;

    pub fn for_viewport(width: f64) -> Self {
        if width <= Self::MOBILE_BREAKPOINT {
            Self {
                width_percent: 95,
                padding_px: 20,
                title_font_px: 20,
                body_font_px: 14,
            }
        } else {
            Self {
                width_percent: 80,
                padding_px: 30,
                title_font_px: 24,
                body_font_px: 16,
            }
        }
    }

    /// Inline style of the full-screen backdrop
    pub fn container_css(displayed: bool, opacity: f32) -> String {
        format!(
            "position:fixed;top:0;left:0;width:100%;height:100%;display:{};\
             align-items:center;justify-content:center;background-color:rgba(0,0,0,{});\
             z-index:1000;opacity:{:.3}",
            if displayed { "flex" } else { "none" },
            BACKDROP_ALPHA,
            opacity.clamp(0.0, 1.0)
        )
    }

    /// Inline style of the dialog box at the given content scale
    pub fn content_css(&self, scale: f32) -> String {
        format!(
            "background-color:#fff;padding:{}px;border-radius:8px;max-width:{}px;width:{}%;\
             max-height:80vh;overflow:auto;box-shadow:0 4px 15px rgba(0,0,0,0.2);\
             position:relative;color:#333;transform:scale({:.3})",
            self.padding_px, CONTENT_MAX_WIDTH_PX, self.width_percent, scale
        )
    }

    pub fn title_css(&self) -> String {
        format!(
            "margin-top:0;font-size:{}px;color:#222;border-bottom:2px solid #f0f0f0;\
             padding-bottom:10px;margin-bottom:15px",
            self.title_font_px
        )
    }

    pub fn description_css(&self) -> String {
        format!(
            "font-size:{}px;line-height:1.6;margin-bottom:25px",
            self.body_font_px
        )
    }

    /// Inline style of the right-aligned close button
    pub fn close_button_css(hovered: bool) -> String {
        format!(
            "padding:8px 16px;background-color:{};color:white;border:none;border-radius:4px;\
             cursor:pointer;font-size:14px;font-weight:bold;transition:background-color 0.2s;\
             display:block;margin-left:auto",
            if hovered {
                CLOSE_BUTTON_HOVER_COLOR
            } else {
                CLOSE_BUTTON_COLOR
            }
        )
    }
}
