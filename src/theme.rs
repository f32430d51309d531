//! Dark preview theme and palette conversions

use egui::Color32;

pub mod colors {
    use super::Color32;

    pub const BG_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);           // #000000 - page background
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);   // #FFFFFF
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 160); // #A0A0A0 - overlay stats
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(80, 80, 80);        // #505050
}

/// Premultiplied color with zero alpha: egui adds it onto the destination,
/// which is additive blending. `opacity` scales the contribution.
pub fn additive(color: [f32; 3], opacity: f32) -> Color32 {
    let [r, g, b] = color.map(|c| ((c * opacity).clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgba_premultiplied(r, g, b, 0)
}

/// Plain opaque color for normal blending
pub fn blended(color: [f32; 3], opacity: f32) -> Color32 {
    let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgba_unmultiplied(r, g, b, (opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
}

pub fn preview_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_PRIMARY;
    visuals.extreme_bg_color = BG_PRIMARY;
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_MUTED);
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;
    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_has_zero_alpha() {
        let c = additive([1.0, 0.5, 0.0], 0.8);
        assert_eq!(c.a(), 0);
        assert_eq!((c.r(), c.g(), c.b()), (204, 102, 0));
    }

    #[test]
    fn blended_keeps_opacity() {
        let c = blended([1.0, 1.0, 1.0], 0.8);
        assert_eq!(c.a(), 204);
    }
}
