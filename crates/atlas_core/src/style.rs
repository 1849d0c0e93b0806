use shared::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
    pub const PURPLE: Rgb = Rgb(128, 0, 128);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Dot marker appearance: filled circle with a contrasting ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill: Rgb,
    pub stroke: Rgb,
    pub radius_px: f32,
    pub stroke_px: f32,
}

impl MarkerStyle {
    pub const DEFAULT: MarkerStyle = MarkerStyle::dot(Rgb::GRAY);

    const fn dot(fill: Rgb) -> Self {
        Self {
            fill,
            stroke: Rgb::WHITE,
            radius_px: 6.0,
            stroke_px: 2.0,
        }
    }

    pub fn for_category(category: &Category) -> Self {
        match category {
            Category::Transit => Self::dot(Rgb::BLUE),
            Category::Road => Self::dot(Rgb::RED),
            Category::Park => Self::dot(Rgb::GREEN),
            Category::Building => Self::dot(Rgb::PURPLE),
            Category::Resilience => Self::dot(Rgb::ORANGE),
            Category::Other(_) => Self::DEFAULT,
        }
    }
}
