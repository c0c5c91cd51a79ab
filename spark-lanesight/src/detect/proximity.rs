use std::fmt::{Display, Formatter};

/// How urgently the driver should react to what is ahead.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Proximity {
    /// No obstacle on the road region.
    None,
    /// An obstacle is ahead, in the far part of the road.
    Attention,
    /// An obstacle occupies the near part of the road.
    Close,
}

impl Display for Proximity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Proximity::None => write!(f, "Free"),
            Proximity::Attention => write!(f, "Attention"),
            Proximity::Close => write!(f, "Slow down"),
        }
    }
}

impl Proximity {
    /// Classifies an accepted obstacle window by how far down the road it reaches.
    ///
    /// The split row sits at `split_factor` of the way from `min_y` to `max_y`.
    /// A window reaching above it is `Attention`; reaching the split row or below is `Close`.
    pub fn classify(
        window_y: u32,
        window_size: u32,
        min_y: i32,
        max_y: i32,
        split_factor: f32,
    ) -> Self {
        let center_y = window_y as f32 + window_size as f32;
        let threshold_y = min_y as f32 + (max_y - min_y) as f32 * split_factor;

        if center_y < threshold_y {
            Proximity::Attention
        } else {
            Proximity::Close
        }
    }
}
