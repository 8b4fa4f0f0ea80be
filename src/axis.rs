use crate::Error;

/// Number of axes in the standard multirotor control vector.
pub const NUM_AXES: usize = 6;

/// Index of each entry in the standard multirotor control vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum ControlAxis {
    Roll = 0,
    Pitch = 1,
    Yaw = 2,
    ThrustX = 3,
    ThrustY = 4,
    ThrustZ = 5,
}

impl ControlAxis {
    pub const ALL: [ControlAxis; NUM_AXES] = [
        ControlAxis::Roll,
        ControlAxis::Pitch,
        ControlAxis::Yaw,
        ControlAxis::ThrustX,
        ControlAxis::ThrustY,
        ControlAxis::ThrustZ,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl From<ControlAxis> for usize {
    fn from(axis: ControlAxis) -> Self {
        axis.index()
    }
}

/// Order in which control axes are desaturated, from lowest to highest priority.
///
/// The last axis in the order is corrected last, so it keeps its setpoint most faithfully
/// when the actuators cannot produce the full demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisPriority<const A: usize> {
    order: [usize; A],
}

impl<const A: usize> AxisPriority<A> {
    /// Create a priority order from a permutation of axis indices (lowest priority first).
    pub fn new(order: [usize; A]) -> Result<Self, Error> {
        let mut seen = [false; A];
        for &axis in &order {
            if axis >= A {
                return Err(Error::AxisOutOfRange {
                    axis,
                    num_axes: A,
                });
            }
            if seen[axis] {
                return Err(Error::DuplicateAxis(axis));
            }
            seen[axis] = true;
        }

        Ok(Self { order })
    }

    pub fn lowest(&self) -> Option<usize> {
        self.order.first().copied()
    }

    pub fn highest(&self) -> Option<usize> {
        self.order.last().copied()
    }

    /// Iterate over the axes from lowest to highest priority.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    pub fn as_array(&self) -> &[usize; A] {
        &self.order
    }
}

impl<const A: usize> Default for AxisPriority<A> {
    fn default() -> Self {
        Self {
            order: core::array::from_fn(|axis| axis),
        }
    }
}

impl AxisPriority<NUM_AXES> {
    pub fn from_axes(axes: [ControlAxis; NUM_AXES]) -> Result<Self, Error> {
        Self::new(axes.map(ControlAxis::index))
    }

    /// Yaw is given up first and vertical thrust is protected the most.
    pub fn multirotor() -> Self {
        Self {
            order: [
                ControlAxis::Yaw.index(),
                ControlAxis::ThrustX.index(),
                ControlAxis::ThrustY.index(),
                ControlAxis::Pitch.index(),
                ControlAxis::Roll.index(),
                ControlAxis::ThrustZ.index(),
            ],
        }
    }
}

impl<'a, const A: usize> IntoIterator for &'a AxisPriority<A> {
    type Item = usize;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisPriority, ControlAxis, NUM_AXES};
    use crate::Error;

    #[test]
    fn it_accepts_a_permutation() {
        let priority = AxisPriority::new([2, 0, 1]).unwrap();
        let mut order = [0; 3];
        for (slot, axis) in order.iter_mut().zip(&priority) {
            *slot = axis;
        }
        assert_eq!(order, [2, 0, 1]);
        assert_eq!(priority.lowest(), Some(2));
        assert_eq!(priority.highest(), Some(1));
    }

    #[test]
    fn it_rejects_out_of_range_axes() {
        assert_eq!(
            AxisPriority::new([0, 3, 1]),
            Err(Error::AxisOutOfRange {
                axis: 3,
                num_axes: 3
            })
        );
    }

    #[test]
    fn it_rejects_duplicate_axes() {
        assert_eq!(
            AxisPriority::new([0, 1, 1]),
            Err(Error::DuplicateAxis(1))
        );
    }

    #[test]
    fn default_is_index_order() {
        assert_eq!(AxisPriority::<4>::default().as_array(), &[0, 1, 2, 3]);
    }

    #[test]
    fn multirotor_protects_vertical_thrust() {
        let priority = AxisPriority::multirotor();
        assert_eq!(priority.lowest(), Some(ControlAxis::Yaw.index()));
        assert_eq!(priority.highest(), Some(ControlAxis::ThrustZ.index()));
        assert!(AxisPriority::<NUM_AXES>::new(*priority.as_array()).is_ok());
    }

    #[test]
    fn from_axes_maps_indices() {
        let priority = AxisPriority::from_axes([
            ControlAxis::ThrustZ,
            ControlAxis::Roll,
            ControlAxis::Pitch,
            ControlAxis::Yaw,
            ControlAxis::ThrustX,
            ControlAxis::ThrustY,
        ])
        .unwrap();
        assert_eq!(priority.as_array(), &[5, 0, 1, 2, 3, 4]);
    }
}
