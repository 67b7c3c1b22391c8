use log::{debug, info};
use serde::Serialize;
use std::fmt;

use crate::domain::GeoCoordinate;
use crate::geometry::Boundary;

/// Membership change between two consecutive fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Entered,
    Exited,
}

/// Result of checking one fix against the fence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub fix: GeoCoordinate,
    pub inside: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

/// `lat,lon inside|outside`, followed by `ENTERED`/`EXITED` on a transition
///
/// Coordinates use the shortest form that reads back to the same `f32`, so a
/// fix given as `40.7125` prints as `40.7125`.
impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} {}",
            self.fix.lat,
            self.fix.lon,
            if self.inside { "inside" } else { "outside" }
        )?;
        match self.transition {
            Some(Transition::Entered) => write!(f, "  ENTERED"),
            Some(Transition::Exited) => write!(f, "  EXITED"),
            None => Ok(()),
        }
    }
}

/// Tracks a stream of fixes against one boundary and reports entries and exits
///
/// The first fix only establishes the initial state and never produces a
/// transition.
#[derive(Debug, Clone)]
pub struct FenceMonitor<'a> {
    name: String,
    boundary: Boundary<'a>,
    last_inside: Option<bool>,
}

impl<'a> FenceMonitor<'a> {
    pub fn new(name: impl Into<String>, boundary: Boundary<'a>) -> Self {
        Self {
            name: name.into(),
            boundary,
            last_inside: None,
        }
    }

    pub fn observe(&mut self, fix: GeoCoordinate) -> Observation {
        let inside = self.boundary.contains(fix);

        let transition = match (self.last_inside, inside) {
            (Some(false), true) => Some(Transition::Entered),
            (Some(true), false) => Some(Transition::Exited),
            _ => None,
        };
        self.last_inside = Some(inside);

        match transition {
            Some(t) => info!(
                "{:?} '{}' at ({}, {})",
                t, self.name, fix.lat, fix.lon
            ),
            None => debug!(
                "({}, {}) inside '{}': {}",
                fix.lat, fix.lon, self.name, inside
            ),
        }

        Observation {
            fix,
            inside,
            transition,
        }
    }

    /// Membership of the last observed fix, `None` before the first one
    pub fn is_inside(&self) -> Option<bool> {
        self.last_inside
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn boundary(&self) -> &Boundary<'a> {
        &self.boundary
    }
}
