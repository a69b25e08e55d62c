use std::f32::consts::PI;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaseDirection {
    In,
    Out,
    InOut,
}

/// Easing curves, named the way GSAP names them (`power1.inOut`, `sine.out`, `none`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// `power1`..`power4`: polynomial of degree `n + 1`
    Power(u8, EaseDirection),
    Sine(EaseDirection),
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Power(1, EaseDirection::Out)
    }
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve
    pub fn apply(self, p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,
            Easing::Power(n, dir) => {
                let k = i32::from(n) + 1;
                match dir {
                    EaseDirection::In => p.powi(k),
                    EaseDirection::Out => 1.0 - (1.0 - p).powi(k),
                    EaseDirection::InOut => {
                        if p < 0.5 {
                            (2.0 * p).powi(k) / 2.0
                        } else {
                            1.0 - (2.0 * (1.0 - p)).powi(k) / 2.0
                        }
                    }
                }
            }
            Easing::Sine(dir) => match dir {
                EaseDirection::In => 1.0 - (p * PI / 2.0).cos(),
                EaseDirection::Out => (p * PI / 2.0).sin(),
                EaseDirection::InOut => -((PI * p).cos() - 1.0) / 2.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown easing `{0}`")]
pub struct ParseEasingError(pub String);

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseEasingError(s.to_string());
        let (family, dir) = match s.split_once('.') {
            Some((family, dir)) => (family, Some(dir)),
            None => (s, None),
        };
        let dir = match dir {
            None | Some("out") => EaseDirection::Out,
            Some("in") => EaseDirection::In,
            Some("inOut") => EaseDirection::InOut,
            Some(_) => return Err(err()),
        };
        let power = |n: u8| Easing::Power(n, dir);
        match family {
            "none" | "linear" | "power0" => Ok(Easing::Linear),
            "power1" | "quad" => Ok(power(1)),
            "power2" | "cubic" => Ok(power(2)),
            "power3" | "quart" => Ok(power(3)),
            "power4" | "quint" | "strong" => Ok(power(4)),
            "sine" => Ok(Easing::Sine(dir)),
            _ => Err(err()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gsap_names() {
        assert_eq!("none".parse::<Easing>(), Ok(Easing::Linear));
        assert_eq!("power1".parse::<Easing>(), Ok(Easing::Power(1, EaseDirection::Out)));
        assert_eq!("power1.inOut".parse::<Easing>(), Ok(Easing::Power(1, EaseDirection::InOut)));
        assert_eq!("sine.in".parse::<Easing>(), Ok(Easing::Sine(EaseDirection::In)));
        assert!("bounce.out".parse::<Easing>().is_err());
        assert!("power2.sideways".parse::<Easing>().is_err());
    }

    #[test]
    fn test_endpoints_are_fixed() {
        let curves = [
            Easing::Linear,
            Easing::default(),
            Easing::Power(3, EaseDirection::InOut),
            Easing::Sine(EaseDirection::In),
        ];
        for ease in curves {
            assert!(ease.apply(0.0).abs() < 1e-6, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{ease:?}");
        }
    }

    #[test]
    fn test_in_out_is_symmetric() {
        let ease = Easing::Power(1, EaseDirection::InOut);
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((ease.apply(0.25) + ease.apply(0.75) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_power1_out_is_quadratic() {
        assert!((Easing::default().apply(0.5) - 0.75).abs() < 1e-6);
    }
}
