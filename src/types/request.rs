use anyhow::Context;
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

/// A floor number. Buildings may have basements, so floors can be negative.
pub type Floor = i32;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Idle,
    Up,
    Down,
}

impl Direction {
    /// Floor offset of one step in this direction.
    pub fn delta(self) -> Floor {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Idle => 0,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Idle => write!(f, "Idle"),
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Button pressed on a landing, carries the wanted travel direction.
    HallCall,
    /// Button pressed inside the car, destination only.
    CabCall,
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::HallCall => write!(f, "HallCall"),
            RequestKind::CabCall => write!(f, "CabCall"),
        }
    }
}

/// One call for service. Consumed by [`Car::add_request`](crate::Car::add_request)
/// or [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) and not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Request {
    floor: Floor,
    direction: Direction,
    kind: RequestKind,
}

impl Request {
    pub fn hall(floor: Floor, direction: Direction) -> Self {
        Self {
            floor,
            direction,
            kind: RequestKind::HallCall,
        }
    }

    pub fn cab(floor: Floor) -> Self {
        Self {
            floor,
            direction: Direction::Idle,
            kind: RequestKind::CabCall,
        }
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    /// Requested travel direction. Always `Idle` for cab calls.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn is_cab_call(&self) -> bool {
        self.kind == RequestKind::CabCall
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RequestKind::HallCall => {
                write!(f, "HallCall(floor={}, dir={})", self.floor, self.direction)
            }
            RequestKind::CabCall => write!(f, "CabCall(floor={})", self.floor),
        }
    }
}

/// Button tokens: `Un` up button on floor n, `Dn` down button on floor n,
/// `Pn` panel button for floor n inside the car.
impl FromStr for Request {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> anyhow::Result<Self> {
        let token = raw.trim();
        let mut chars = token.chars();
        let Some(button) = chars.next() else {
            anyhow::bail!("empty request token");
        };
        let num_str = chars.as_str();
        if num_str.is_empty() {
            anyhow::bail!("request token '{token}' has no floor number");
        }
        let floor = num_str
            .parse::<Floor>()
            .context(format!("failed to parse '{num_str}' as a floor"))?;

        match button.to_ascii_uppercase() {
            'U' => Ok(Request::hall(floor, Direction::Up)),
            'D' => Ok(Request::hall(floor, Direction::Down)),
            'P' => Ok(Request::cab(floor)),
            other => anyhow::bail!("unknown request button: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_button_tokens() {
        assert_eq!("U3".parse::<Request>().unwrap(), Request::hall(3, Direction::Up));
        assert_eq!(" d7\n".parse::<Request>().unwrap(), Request::hall(7, Direction::Down));
        assert_eq!("P-1".parse::<Request>().unwrap(), Request::cab(-1));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!("".parse::<Request>().is_err());
        assert!("U".parse::<Request>().is_err());
        assert!("X4".parse::<Request>().is_err());
        assert!("Pfive".parse::<Request>().is_err());
    }

    #[test]
    fn cab_calls_have_no_direction() {
        let r = Request::cab(4);
        assert!(r.is_cab_call());
        assert_eq!(r.direction(), Direction::Idle);
        assert_eq!(r.to_string(), "CabCall(floor=4)");
        assert_eq!(
            Request::hall(5, Direction::Up).to_string(),
            "HallCall(floor=5, dir=Up)"
        );
    }

    #[test]
    fn direction_helpers() {
        assert_eq!(Direction::Up.delta(), 1);
        assert_eq!(Direction::Down.delta(), -1);
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Idle.opposite(), Direction::Idle);
    }
}
