//! Screen scaling
//!
//! Desktop browsers get the game at its native size. Phones and tablets get
//! "show all" scaling: aspect preserved, never smaller than half size or
//! larger than native, centered in the available area.

/// Where and how large to draw the game canvas (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl Viewport {
    /// Inline style for the game container. The canvas and every HUD
    /// overlay are laid out inside it, so they all follow this box; text
    /// sizes read `--scale`.
    pub fn container_style(&self) -> [(&'static str, String); 5] {
        [
            ("left", format!("{}px", self.offset_x)),
            ("top", format!("{}px", self.offset_y)),
            ("width", format!("{}px", self.width)),
            ("height", format!("{}px", self.height)),
            ("--scale", self.scale.to_string()),
        ]
    }
}

const MIN_SCALE: f32 = 0.5;
const MAX_SCALE: f32 = 1.0;

/// Fit a `game_w`×`game_h` game into the available area
pub fn fit_viewport(game_w: f32, game_h: f32, avail_w: f32, avail_h: f32, desktop: bool) -> Viewport {
    if desktop {
        return Viewport {
            width: game_w,
            height: game_h,
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        };
    }

    let scale = (avail_w / game_w)
        .min(avail_h / game_h)
        .clamp(MIN_SCALE, MAX_SCALE);
    let width = game_w * scale;
    let height = game_h * scale;

    Viewport {
        width,
        height,
        offset_x: ((avail_w - width) / 2.0).max(0.0),
        offset_y: ((avail_h - height) / 2.0).max(0.0),
        scale,
    }
}

/// Rough desktop check from a browser user agent string
pub fn is_desktop_user_agent(user_agent: &str) -> bool {
    const MOBILE_MARKERS: [&str; 5] = ["Mobi", "Android", "iPhone", "iPad", "iPod"];
    !MOBILE_MARKERS.iter().any(|m| user_agent.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_keeps_native_size() {
        let vp = fit_viewport(400.0, 490.0, 1920.0, 1080.0, true);
        assert_eq!((vp.width, vp.height, vp.scale), (400.0, 490.0, 1.0));
    }

    #[test]
    fn test_small_phone_scales_down_centered() {
        let vp = fit_viewport(400.0, 490.0, 320.0, 568.0, false);
        assert!((vp.scale - 0.8).abs() < 1e-4);
        assert!((vp.width - 320.0).abs() < 1e-3);
        assert!((vp.height - 392.0).abs() < 1e-3);
        assert!((vp.offset_y - 88.0).abs() < 1e-3);
        assert_eq!(vp.offset_x, 0.0);
    }

    #[test]
    fn test_container_style_tracks_scaled_canvas() {
        let vp = fit_viewport(400.0, 490.0, 320.0, 568.0, false);
        let style = vp.container_style();
        let get = |name: &str| {
            style
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("left"), "0px");
        assert_eq!(get("top"), format!("{}px", vp.offset_y));
        assert_eq!(get("width"), format!("{}px", vp.width));
        assert_eq!(get("height"), format!("{}px", vp.height));
        assert_eq!(get("--scale"), vp.scale.to_string());

        // Desktop pins the game area to the page origin at native size
        let desktop = fit_viewport(400.0, 490.0, 1920.0, 1080.0, true).container_style();
        assert_eq!(desktop[0].1, "0px");
        assert_eq!(desktop[1].1, "0px");
        assert_eq!(desktop[3].1, "490px");
    }

    #[test]
    fn test_scale_is_clamped() {
        let big = fit_viewport(400.0, 490.0, 2000.0, 2000.0, false);
        assert_eq!(big.scale, 1.0);
        let tiny = fit_viewport(400.0, 490.0, 100.0, 100.0, false);
        assert_eq!(tiny.scale, 0.5);
        assert_eq!((tiny.width, tiny.height), (200.0, 245.0));
    }

    #[test]
    fn test_aspect_is_preserved() {
        let vp = fit_viewport(400.0, 490.0, 350.0, 900.0, false);
        assert!((vp.width / vp.height - 400.0 / 490.0).abs() < 1e-4);
    }

    #[test]
    fn test_user_agent_detection() {
        assert!(is_desktop_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0"
        ));
        assert!(!is_desktop_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148"
        ));
    }
}
