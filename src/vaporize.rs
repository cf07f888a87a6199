use std::{cmp::Reverse, collections::HashMap};

use clap::ValueEnum;
use tracing::{debug, trace};

use crate::{
    asteroid::{AsteroidMap, Direction, Position},
    Error,
};

/// Which asteroid of a line gets vaporized when the laser passes over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RemovalPolicy {
    /// Closest to the station first.
    #[default]
    NearestFirst,
    /// Last one found by the row-major scan first.
    ScanOrder,
}

/// Asteroids lying on one line of sight from the station.
#[derive(Debug, Clone)]
pub struct AngleGroup {
    direction: Direction,
    angle: f64,
    asteroids: Vec<Position>,
}

impl AngleGroup {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn asteroids(&self) -> &[Position] {
        &self.asteroids
    }
}

impl AsteroidMap {
    /// Groups all asteroids but `origin` by line of sight, sorted clockwise from up.
    /// Inside a group asteroids keep row-major scan order.
    pub fn angle_groups(&self, origin: &Position) -> Result<Vec<AngleGroup>, Error> {
        if !self.contains(origin) {
            return Err(Error::OriginOutOfMap(origin.x(), origin.y()));
        }

        let mut angle_map: HashMap<Direction, Vec<Position>> = HashMap::new();
        for pos in self.asteroid_positions() {
            if let Some(direction) = (&pos - origin).direction() {
                angle_map.entry(direction).or_default().push(pos);
            }
        }

        let mut groups = angle_map
            .into_iter()
            .map(|(direction, asteroids)| AngleGroup {
                direction,
                angle: direction.angle_degrees(),
                asteroids,
            })
            .collect::<Vec<_>>();
        groups.sort_by(|g0, g1| g0.angle.total_cmp(&g1.angle));

        Ok(groups)
    }

    pub fn vaporize(&self, origin: &Position, policy: RemovalPolicy) -> Result<Vaporization, Error> {
        let groups = self.angle_groups(origin)?;
        Ok(Vaporization::new(origin, groups, policy))
    }

    pub fn vaporization_order(
        &self,
        origin: &Position,
        policy: RemovalPolicy,
    ) -> Result<Vec<Position>, Error> {
        Ok(self.vaporize(origin, policy)?.collect())
    }

    /// The `ordinal`th (1-based) vaporized asteroid.
    pub fn nth_vaporized(
        &self,
        origin: &Position,
        ordinal: usize,
        policy: RemovalPolicy,
    ) -> Result<Position, Error> {
        if ordinal == 0 {
            return Err(Error::ZeroOrdinal);
        }

        let mut vaporization = self.vaporize(origin, policy)?;
        let total = vaporization.remaining();
        vaporization
            .nth(ordinal - 1)
            .ok_or(Error::InsufficientAsteroids(ordinal, total))
    }
}

/// Rotating laser sweep, yields asteroids in the order they are vaporized.
#[derive(Debug)]
pub struct Vaporization {
    // The next asteroid to vaporize in each group is its last one.
    blasting_order: Vec<AngleGroup>,
    cursor: usize,
    destroyed: usize,
    rotation: usize,
}

impl Vaporization {
    fn new(origin: &Position, mut blasting_order: Vec<AngleGroup>, policy: RemovalPolicy) -> Self {
        if policy == RemovalPolicy::NearestFirst {
            for group in &mut blasting_order {
                group
                    .asteroids
                    .sort_by_key(|pos| Reverse((pos - origin).length_squared()));
            }
        }
        debug!(
            origin = %origin,
            groups = blasting_order.len(),
            ?policy,
            "laser station ready"
        );

        Self {
            blasting_order,
            cursor: 0,
            destroyed: 0,
            rotation: 0,
        }
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    pub fn remaining(&self) -> usize {
        self.blasting_order.iter().map(|g| g.asteroids.len()).sum()
    }
}

impl Iterator for Vaporization {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.blasting_order.is_empty() {
            return None;
        }

        if self.cursor >= self.blasting_order.len() {
            self.cursor = 0;
            self.rotation += 1;
            debug!(
                rotation = self.rotation,
                destroyed = self.destroyed,
                "laser completed a rotation"
            );
        }

        let group = &mut self.blasting_order[self.cursor];
        let pos = group.asteroids.pop()?;
        if group.asteroids.is_empty() {
            debug!(angle = group.angle, "no asteroid left at angle");
            // Removal shifts the next group under the cursor.
            self.blasting_order.remove(self.cursor);
        } else {
            self.cursor += 1;
        }
        self.destroyed += 1;
        trace!(ordinal = self.destroyed, position = %pos, "vaporized asteroid");

        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}
