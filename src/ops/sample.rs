/// Raw parity values below this mark a sample that is not part of the image.
pub const INVALID_THRESHOLD: f32 = -0.1;

/// Written into all three planes of a sample the engine gives up on.
pub const INVALID: f32 = -10000.0;

/// Number of orientation-reversing operations, mod 2, or the invalid marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
    Invalid,
}

impl Parity {
    /// Decodes the float stored in the parity plane.
    pub fn from_value(value: f32) -> Self {
        if value.is_nan() || value < INVALID_THRESHOLD {
            return Parity::Invalid;
        }
        if (value.round() as i64).rem_euclid(2) == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    pub fn value(self) -> f32 {
        match self {
            Parity::Even => 0.0,
            Parity::Odd => 1.0,
            Parity::Invalid => INVALID,
        }
    }

    #[inline(always)]
    pub fn flip(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
            Parity::Invalid => Parity::Invalid,
        }
    }

    pub fn is_valid(self) -> bool {
        self != Parity::Invalid
    }
}

/// One point of the map together with its reflection parity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    pub parity: Parity,
}

impl Sample {
    pub const INVALID: Sample = Sample {
        x: INVALID,
        y: INVALID,
        parity: Parity::Invalid,
    };

    pub fn new(x: f32, y: f32, parity: Parity) -> Self {
        Self { x, y, parity }
    }

    /// Builds a sample from the `(x, y, parity)` triple of a map cell.
    pub fn from_raw(raw: [f32; 3]) -> Self {
        Self::new(raw[0], raw[1], Parity::from_value(raw[2]))
    }

    pub fn to_raw(self) -> [f32; 3] {
        match self.parity {
            Parity::Invalid => [INVALID; 3],
            parity => [self.x, self.y, parity.value()],
        }
    }

    #[inline(always)]
    pub fn norm_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_decoding() {
        assert_eq!(Parity::from_value(0.0), Parity::Even);
        assert_eq!(Parity::from_value(1.0), Parity::Odd);
        assert_eq!(Parity::from_value(2.0), Parity::Even);
        assert_eq!(Parity::from_value(-0.05), Parity::Even);
        assert_eq!(Parity::from_value(-1.0), Parity::Invalid);
        assert_eq!(Parity::from_value(INVALID), Parity::Invalid);
        assert_eq!(Parity::from_value(f32::NAN), Parity::Invalid);
    }

    #[test]
    fn test_flip_keeps_invalid() {
        assert_eq!(Parity::Even.flip(), Parity::Odd);
        assert_eq!(Parity::Odd.flip().flip(), Parity::Odd);
        assert_eq!(Parity::Invalid.flip(), Parity::Invalid);
    }

    #[test]
    fn test_invalid_sample_writes_marker_everywhere() {
        let raw = Sample::new(0.2, 0.1, Parity::Invalid).to_raw();
        assert_eq!(raw, [INVALID, INVALID, INVALID]);
        assert_eq!(Sample::from_raw([0.2, 0.1, 1.0]).to_raw(), [0.2, 0.1, 1.0]);
    }
}
