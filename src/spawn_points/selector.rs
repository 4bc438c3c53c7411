//! The level's spawn-point list and safe random selection.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::data::SpawnPoint;

/// Spawn points of the current level, in file order.
#[derive(Resource, Debug, Default, Clone)]
pub struct SpawnPoints {
    points: Vec<SpawnPoint>,
}

impl SpawnPoints {
    pub fn from_points(points: Vec<SpawnPoint>) -> Self {
        Self { points }
    }

    pub fn append(&mut self, point: SpawnPoint) {
        self.points.push(point);
    }

    /// Remove `point`. Already-removed points are ignored.
    pub fn remove(&mut self, point: &SpawnPoint) -> bool {
        match self.points.iter().position(|p| p == point) {
            Some(index) => {
                self.points.remove(index);
                true
            }
            None => false,
        }
    }

    /// Append `point` unless an existing point is closer than `min_distance`.
    pub fn add_separated(&mut self, point: SpawnPoint, min_distance: f32) -> bool {
        let crowded = self
            .points
            .iter()
            .any(|p| p.position.distance(point.position) < min_distance);
        if crowded {
            return false;
        }
        self.append(point);
        true
    }

    /// Remove the point nearest to `position`, if it lies within `tolerance`.
    pub fn remove_nearest(&mut self, position: Vec3, tolerance: f32) -> Option<SpawnPoint> {
        let (index, distance) = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.position.distance(position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        (distance <= tolerance).then(|| self.points.remove(index))
    }

    /// Pick a random point at least `min_distance` away from every occupant.
    ///
    /// With no occupants any point qualifies. Returns `None` instead of an
    /// unsafe point when nothing qualifies.
    pub fn get_random<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupants: &[Vec3],
        min_distance: f32,
    ) -> Option<SpawnPoint> {
        let mut shuffled = self.points.clone();
        shuffled.shuffle(rng);

        shuffled.into_iter().find(|point| {
            occupants
                .iter()
                .all(|origin| origin.distance(point.position) >= min_distance)
        })
    }

    pub fn get(&self, index: usize) -> Option<&SpawnPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnPoint> + '_ {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[SpawnPoint] {
        &self.points
    }

    pub fn replace(&mut self, points: Vec<SpawnPoint>) {
        self.points = points;
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(x: f32) -> SpawnPoint {
        SpawnPoint::new(Vec3::new(x, 0.0, 0.0), Vec3::ZERO)
    }

    #[test]
    fn remove_tolerates_missing_points() {
        let mut points = SpawnPoints::from_points(vec![at(0.0), at(100.0)]);

        assert!(points.remove(&at(0.0)));
        assert!(!points.remove(&at(0.0)));
        assert_eq!(points.as_slice(), &[at(100.0)]);
    }

    #[test]
    fn add_rejects_points_too_close() {
        let mut points = SpawnPoints::from_points(vec![at(0.0)]);

        assert!(!points.add_separated(at(149.0), 150.0));
        assert!(points.add_separated(at(150.0), 150.0));
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn remove_nearest_respects_tolerance() {
        let mut points = SpawnPoints::from_points(vec![at(0.0), at(100.0)]);

        assert_eq!(points.remove_nearest(Vec3::new(50.0, 0.0, 0.0), 20.0), None);
        assert_eq!(points.remove_nearest(Vec3::new(95.0, 0.0, 0.0), 20.0), Some(at(100.0)));
        assert_eq!(points.as_slice(), &[at(0.0)]);
    }

    #[test]
    fn no_occupants_returns_the_first_shuffled_point() {
        let list = vec![at(0.0), at(10.0), at(20.0), at(30.0)];
        let points = SpawnPoints::from_points(list.clone());

        for seed in 0..10 {
            let mut shuffled = list.clone();
            shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(points.get_random(&mut rng, &[], 150.0), Some(shuffled[0]));
        }
    }

    #[test]
    fn empty_list_is_not_found() {
        let points = SpawnPoints::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(points.get_random(&mut rng, &[], 150.0).is_none());
    }

    #[test]
    fn only_the_safe_point_is_chosen() {
        let points = SpawnPoints::from_points(vec![at(0.0), at(50.0), at(1000.0)]);
        let occupants = [Vec3::new(10.0, 0.0, 0.0)];

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(points.get_random(&mut rng, &occupants, 150.0), Some(at(1000.0)));
        }
    }

    #[test]
    fn unsafe_everywhere_is_not_found() {
        let points = SpawnPoints::from_points(vec![at(0.0), at(50.0)]);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(points.get_random(&mut rng, &[Vec3::new(25.0, 0.0, 0.0)], 150.0), None);
    }
}
