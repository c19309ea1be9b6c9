//! Vehicle composition and segment resolution
//!
//! A vehicle is an ordered run of segments (rear to front). Seat slots are
//! numbered across the whole vehicle in the same order, so each segment owns a
//! contiguous index range.

use std::ops::Range;

use super::types::{Alignment, SegmentId, VehicleMode, COUPLER_GAP, SLOT_LENGTH};

/// One doored block of the vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSegment {
    pub id: SegmentId,
    pub capacity: usize,
}

impl VehicleSegment {
    fn new(id: SegmentId, capacity: usize) -> Self {
        Self { id, capacity }
    }
}

// Door sets per alignment. `All` shares the rear row.
const LONG_REAR_DOORS: [SegmentId; 2] = [SegmentId::Rear, SegmentId::Mid];
const LONG_FRONT_DOORS: [SegmentId; 2] = [SegmentId::Mid, SegmentId::Front];
const SHORT_DOORS: [SegmentId; 1] = [SegmentId::Single];

/// The segment layout for one vehicle mode
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleComposition {
    mode: VehicleMode,
    segments: Vec<VehicleSegment>,
}

impl VehicleComposition {
    /// rear(3), mid(4), front(3) with coupler gaps between them
    pub fn long() -> Self {
        Self {
            mode: VehicleMode::Long,
            segments: vec![
                VehicleSegment::new(SegmentId::Rear, 3),
                VehicleSegment::new(SegmentId::Mid, 4),
                VehicleSegment::new(SegmentId::Front, 3),
            ],
        }
    }

    /// A single uniform segment of 7 slots
    pub fn short() -> Self {
        Self {
            mode: VehicleMode::Short,
            segments: vec![VehicleSegment::new(SegmentId::Single, 7)],
        }
    }

    pub fn for_mode(mode: VehicleMode) -> Self {
        match mode {
            VehicleMode::Long => Self::long(),
            VehicleMode::Short => Self::short(),
        }
    }

    pub fn mode(&self) -> VehicleMode {
        self.mode
    }

    pub fn segments(&self) -> &[VehicleSegment] {
        &self.segments
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.segments.iter().any(|s| s.id == id)
    }

    /// Total number of seat slots across all segments
    pub fn total_slots(&self) -> usize {
        self.segments.iter().map(|s| s.capacity).sum()
    }

    /// The segment owning a slot, or `None` past the last slot
    pub fn segment_of_slot(&self, slot: usize) -> Option<SegmentId> {
        let mut start = 0;
        for segment in &self.segments {
            if slot < start + segment.capacity {
                return Some(segment.id);
            }
            start += segment.capacity;
        }
        None
    }

    /// The ordered slot indices owned by a segment
    pub fn slot_range(&self, id: SegmentId) -> Option<Range<usize>> {
        let mut start = 0;
        for segment in &self.segments {
            if segment.id == id {
                return Some(start..start + segment.capacity);
            }
            start += segment.capacity;
        }
        None
    }

    /// Physical length from trailing to leading edge
    pub fn length(&self) -> f32 {
        let body: f32 = self
            .segments
            .iter()
            .map(|s| s.capacity as f32 * SLOT_LENGTH)
            .sum();
        let gaps = self.segments.len().saturating_sub(1) as f32 * COUPLER_GAP;
        body + gaps
    }

    /// Segments whose doors face the platform at a station with this alignment
    pub fn open_segments(&self, alignment: Alignment) -> &'static [SegmentId] {
        match (self.mode, alignment) {
            (VehicleMode::Short, _) => &SHORT_DOORS,
            (VehicleMode::Long, Alignment::Rear | Alignment::All) => &LONG_REAR_DOORS,
            (VehicleMode::Long, Alignment::Front) => &LONG_FRONT_DOORS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_slots_resolve_to_their_segment() {
        let long = VehicleComposition::long();
        let owners: Vec<_> = (0..10).filter_map(|i| long.segment_of_slot(i)).collect();
        assert_eq!(
            owners,
            vec![
                SegmentId::Rear,
                SegmentId::Rear,
                SegmentId::Rear,
                SegmentId::Mid,
                SegmentId::Mid,
                SegmentId::Mid,
                SegmentId::Mid,
                SegmentId::Front,
                SegmentId::Front,
                SegmentId::Front,
            ]
        );
        assert_eq!(long.segment_of_slot(10), None);
    }

    #[test]
    fn slot_range_matches_segment_of_slot() {
        for composition in [VehicleComposition::long(), VehicleComposition::short()] {
            for segment in composition.segments() {
                let range = composition.slot_range(segment.id).unwrap();
                assert_eq!(range.len(), segment.capacity);
                for slot in range {
                    assert_eq!(composition.segment_of_slot(slot), Some(segment.id));
                }
            }
        }
    }

    #[test]
    fn short_vehicle_has_one_segment_for_every_alignment() {
        let short = VehicleComposition::short();
        assert_eq!(short.total_slots(), 7);
        assert_eq!(short.slot_range(SegmentId::Single), Some(0..7));
        assert_eq!(short.slot_range(SegmentId::Rear), None);
        for alignment in [Alignment::Rear, Alignment::Front, Alignment::All] {
            assert_eq!(short.open_segments(alignment), &[SegmentId::Single]);
        }
    }

    #[test]
    fn vehicle_length_includes_coupler_gaps() {
        assert_eq!(VehicleComposition::long().length(), 108.0);
        assert_eq!(VehicleComposition::short().length(), 70.0);
    }
}
