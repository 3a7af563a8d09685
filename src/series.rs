use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub values: Vec<f64>,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Fixed-capacity FIFO window of chart points. Oldest points are evicted first.
#[derive(Debug)]
pub struct BoundedSeries {
    points: VecDeque<SeriesPoint>,
    capacity: usize,
}

impl BoundedSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn append(&mut self, point: SeriesPoint) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn replace(&mut self, points: Vec<SeriesPoint>) {
        let skip = points.len().saturating_sub(self.capacity);
        self.points.clear();
        self.points.extend(points.into_iter().skip(skip));
    }

    pub fn snapshot(&self) -> Vec<SeriesPoint> {
        self.points.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundedSeries, SeriesPoint};

    fn point(index: usize) -> SeriesPoint {
        SeriesPoint::new(format!("t{index}"), vec![index as f64, (index * 2) as f64])
    }

    #[test]
    fn clamps_capacity_to_at_least_one() {
        let series = BoundedSeries::with_capacity(0);
        assert_eq!(series.capacity(), 1);
    }

    #[test]
    fn keeps_last_capacity_points_in_order() {
        for capacity in [1usize, 3, 50] {
            let mut series = BoundedSeries::with_capacity(capacity);
            let total = capacity * 3 + 1;

            for index in 0..total {
                series.append(point(index));
                assert!(series.len() <= capacity);
            }

            let expected = (total - capacity..total).map(point).collect::<Vec<_>>();
            assert_eq!(series.snapshot(), expected);
        }
    }

    #[test]
    fn shorter_sequences_are_kept_whole() {
        let mut series = BoundedSeries::with_capacity(5);
        series.append(point(1));
        series.append(point(2));

        let labels = series
            .snapshot()
            .into_iter()
            .map(|point| point.label)
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["t1", "t2"]);
    }

    #[test]
    fn replace_keeps_newest_points_within_capacity() {
        let mut series = BoundedSeries::with_capacity(3);
        series.append(point(100));

        series.replace((0..6).map(point).collect());
        assert_eq!(series.snapshot(), vec![point(3), point(4), point(5)]);

        series.replace(Vec::new());
        assert!(series.is_empty());
    }
}
