//! Targets and obstacle zones, described as data.
//!
//! Entities are never removed. A destroyed target keeps its slot with
//! `alive == false` so indices stay stable for zones that reference it.

use crate::collision::TriggerRect;
use crate::config::*;
use crate::error::SceneError;
use crate::types::Point;

// A destructible pig
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub center: Point,
    /// Collision radius, also the horizontal semi-axis of the drawn ellipse.
    pub radius: f64,
    /// Vertical semi-axis of the drawn ellipse.
    pub half_height: f64,
    pub alive: bool,
}

impl Target {
    pub fn new(center: Point, radius: f64, half_height: f64) -> Self {
        Target {
            center,
            radius,
            half_height,
            alive: true,
        }
    }
}

/// How a zone's log topples once struck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallSpec {
    /// World point the log rotates about.
    pub pivot: Point,
    /// Target flattened once the log has tipped past `CRUSH_ANGLE`.
    pub crushes: Option<usize>,
}

/// Rotation state of a toppling log, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FallAnimation {
    pub triggered: bool,
    pub angle: f64,
    pub angular_v: f64,
}

impl FallAnimation {
    /// Start toppling. Spin is taken from the horizontal speed at impact. A log
    /// that is already falling keeps its current motion.
    pub fn start(&mut self, impact_vx: f64) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        self.angle = FALL_START_ANGLE;
        self.angular_v = impact_vx * FALL_SPIN_TRANSFER;
        true
    }

    pub fn advance(&mut self) {
        if !self.triggered {
            return;
        }
        self.angle += self.angular_v;
        self.angular_v += FALL_ANGULAR_ACCEL;
        self.angle = self.angle.min(FALL_MAX_ANGLE);
    }

    pub fn reset(&mut self) {
        *self = FallAnimation::default();
    }
}

// A wooden log with its trigger region
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleZone {
    pub name: &'static str,
    pub trigger: TriggerRect,
    /// Center of the drawn log when upright.
    pub center: Point,
    pub half_extents: Point,
    pub fall: Option<FallSpec>,
    pub animation: FallAnimation,
}

impl ObstacleZone {
    /// Offset that carries the log's local origin to its upright center when
    /// rotating about the fall pivot.
    pub fn pivot_offset(&self) -> Option<(Point, Point)> {
        self.fall.map(|fall| (fall.pivot, self.center - fall.pivot))
    }

    /// Current rotation in radians, zero unless the log is falling.
    pub fn rotation(&self) -> f64 {
        if self.animation.triggered {
            self.animation.angle.to_radians()
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub targets: Vec<Target>,
    pub zones: Vec<ObstacleZone>,
}

impl Scene {
    /// The three-pig level with one toppling post and one fixed lintel.
    pub fn standard() -> Self {
        let floor = FLOOR_Y;
        let targets = vec![
            Target::new(Point::new(50.0, floor - 18.0), 23.0, 18.0),
            Target::new(Point::new(300.0, floor - 40.0 - 23.0), 28.0, 23.0),
            Target::new(Point::new(400.0, floor - 20.0), 25.0, 20.0),
        ];

        let zones = vec![
            ObstacleZone {
                name: "upright log",
                trigger: TriggerRect::new(-10.0, 10.0, 140.0),
                center: Point::new(0.0, 170.0),
                half_extents: Point::new(10.0, 30.0),
                fall: Some(FallSpec {
                    pivot: Point::new(10.0, floor),
                    crushes: Some(0),
                }),
                animation: FallAnimation::default(),
            },
            ObstacleZone {
                name: "lintel log",
                // The trigger stops 10 units short of the drawn right edge
                trigger: TriggerRect::new(265.0, 325.0, 160.0),
                center: Point::new(300.0, 180.0),
                half_extents: Point::new(35.0, 20.0),
                fall: None,
                animation: FallAnimation::default(),
            },
        ];

        Scene { targets, zones }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        for (index, target) in self.targets.iter().enumerate() {
            if target.radius <= 0.0 || target.half_height <= 0.0 {
                return Err(SceneError::NonPositiveRadius {
                    index,
                    radius: target.radius.min(target.half_height),
                });
            }
        }
        for (index, zone) in self.zones.iter().enumerate() {
            if zone.trigger.min_x >= zone.trigger.max_x {
                return Err(SceneError::EmptyTrigger {
                    index,
                    name: zone.name,
                    min_x: zone.trigger.min_x,
                    max_x: zone.trigger.max_x,
                });
            }
            if let Some(FallSpec {
                crushes: Some(target),
                ..
            }) = zone.fall
            {
                if target >= self.targets.len() {
                    return Err(SceneError::UnknownCrushTarget {
                        zone: index,
                        target,
                        count: self.targets.len(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn alive_targets(&self) -> usize {
        self.targets.iter().filter(|t| t.alive).count()
    }

    /// Stand every log back up. Destroyed targets stay destroyed.
    pub fn reset_zones(&mut self) {
        for zone in self.zones.iter_mut() {
            zone.animation.reset();
        }
    }
}
