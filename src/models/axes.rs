//! Indexing conventions for 3-vectors, 6-vectors and 6×6 matrices.

use std::fmt;

/// Cartesian axis of a 3-vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Degree of freedom of a 6-vector. Surge, sway and heave are translational
/// (m, m/s, N); roll, pitch and yaw are rotational (rad, rad/s, N⋅m).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dof {
    Surge,
    Sway,
    Heave,
    Roll,
    Pitch,
    Yaw,
}

impl Dof {
    pub const ALL: [Dof; 6] = [
        Dof::Surge,
        Dof::Sway,
        Dof::Heave,
        Dof::Roll,
        Dof::Pitch,
        Dof::Yaw,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_translational(self) -> bool {
        matches!(self, Dof::Surge | Dof::Sway | Dof::Heave)
    }

    pub fn is_rotational(self) -> bool {
        !self.is_translational()
    }

    /// Axis the DOF translates along or rotates about.
    pub fn axis(self) -> Axis {
        match self {
            Dof::Surge | Dof::Roll => Axis::X,
            Dof::Sway | Dof::Pitch => Axis::Y,
            Dof::Heave | Dof::Yaw => Axis::Z,
        }
    }
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dof::Surge => "surge",
            Dof::Sway => "sway",
            Dof::Heave => "heave",
            Dof::Roll => "roll",
            Dof::Pitch => "pitch",
            Dof::Yaw => "yaw",
        };
        write!(f, "{}", name)
    }
}

/// Reporting names for the rotational DOFs. Indexes the attitude 3-vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttitudeAngle {
    Heel,
    Trim,
    Heading,
}

impl AttitudeAngle {
    pub const ALL: [AttitudeAngle; 3] =
        [AttitudeAngle::Heel, AttitudeAngle::Trim, AttitudeAngle::Heading];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn dof(self) -> Dof {
        match self {
            AttitudeAngle::Heel => Dof::Roll,
            AttitudeAngle::Trim => Dof::Pitch,
            AttitudeAngle::Heading => Dof::Yaw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dof_indices_are_contiguous() {
        for (i, dof) in Dof::ALL.iter().enumerate() {
            assert_eq!(dof.index(), i);
        }
    }

    #[test]
    fn attitude_aliases_rotational_dofs() {
        for angle in AttitudeAngle::ALL {
            let dof = angle.dof();
            assert!(dof.is_rotational());
            assert_eq!(dof.index() - 3, angle.index());
            assert_eq!(dof.axis().index(), angle.index());
        }
    }

    #[test]
    fn translational_split() {
        let translational: Vec<_> = Dof::ALL.iter().filter(|d| d.is_translational()).collect();
        assert_eq!(translational, vec![&Dof::Surge, &Dof::Sway, &Dof::Heave]);
    }
}
