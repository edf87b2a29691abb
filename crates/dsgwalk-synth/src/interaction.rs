//! Two-node interaction operators.
//!
//! Both models act only on the single-excitation subspace `{|01⟩, |10⟩}` of
//! a node pair, so each is fully described by a 2x2 block. The unary
//! encoding embeds the block into a 4x4 matrix gate; the compact encoding
//! applies it as a controlled single-qubit gate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use dsgwalk_compile::Unitary2x2;
use dsgwalk_ir::{ControlledGate, CustomGate, Gate, StandardGate};
use num_complex::Complex64;

use crate::error::{SynthError, SynthResult};
use crate::params::WalkParameters;

/// Hamiltonian model of a single edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InteractionModel {
    /// Isotropic exchange `XX + YY + ZZ`.
    #[default]
    Heisenberg,
    /// Planar exchange `XX + YY`.
    #[serde(rename = "XY")]
    Xy,
}

impl InteractionModel {
    /// The operator on `span{|01⟩, |10⟩}`.
    pub fn block(self, params: &WalkParameters) -> Unitary2x2 {
        match self {
            Self::Heisenberg => {
                let one = Complex64::new(1.0, 0.0);
                let diag = (params.zeta + one) / 2.0;
                let off = (one - params.zeta) / 2.0;
                Unitary2x2::new(diag, off, off, diag)
            }
            Self::Xy => {
                let c = Complex64::new(params.theta.cos(), 0.0);
                let s = Complex64::new(0.0, -params.theta.sin());
                Unitary2x2::new(c, s, s, c)
            }
        }
    }

    /// The 4x4 pair operator, identity on `|00⟩` and `|11⟩`.
    pub fn two_node_gate(self, params: &WalkParameters) -> SynthResult<CustomGate> {
        let [a, b, c, d] = self.block(params).data;
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        #[rustfmt::skip]
        let matrix = vec![
            one,  zero, zero, zero,
            zero, a,    b,    zero,
            zero, c,    d,    zero,
            zero, zero, zero, one,
        ];
        Ok(CustomGate::new("interaction", 2, matrix)?)
    }

    /// The singly-controlled block used by the compact encoding.
    ///
    /// Operands are `[control, target]`.
    pub fn controlled_gate(self, params: &WalkParameters) -> SynthResult<Gate> {
        match self {
            Self::Heisenberg => {
                let base = CustomGate::new("U", 1, self.block(params).to_vec())?;
                Ok(ControlledGate::new(base).into())
            }
            Self::Xy => Ok(StandardGate::CRx(2.0 * params.theta).into()),
        }
    }

    /// Angles `(xx, yy, zz)` with `Rxx(xx)·Ryy(yy)·Rzz(zz)` equal to
    /// [`two_node_gate`](Self::two_node_gate) up to global phase.
    pub fn exchange_angles(self, params: &WalkParameters) -> (f64, f64, f64) {
        let theta = params.theta;
        match self {
            Self::Heisenberg => (-theta, -theta, -theta),
            Self::Xy => (theta, theta, 0.0),
        }
    }

    /// Canonical tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heisenberg => "Heisenberg",
            Self::Xy => "XY",
        }
    }
}

impl fmt::Display for InteractionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionModel {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heisenberg" => Ok(Self::Heisenberg),
            "xy" => Ok(Self::Xy),
            _ => Err(SynthError::UnsupportedModel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsgwalk_ir::GateKind;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    const MODELS: [InteractionModel; 2] = [InteractionModel::Heisenberg, InteractionModel::Xy];

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("heisenberg".parse::<InteractionModel>().unwrap(), InteractionModel::Heisenberg);
        assert_eq!("XY".parse::<InteractionModel>().unwrap(), InteractionModel::Xy);
        assert_eq!("xy".parse::<InteractionModel>().unwrap(), InteractionModel::Xy);
        assert!(matches!(
            "Ising".parse::<InteractionModel>(),
            Err(SynthError::UnsupportedModel(tag)) if tag == "Ising"
        ));
    }

    #[test]
    fn test_zero_theta_is_identity() {
        let params = WalkParameters::from_theta(0.0);
        for model in MODELS {
            assert!(model.block(&params).distance(&Unitary2x2::identity()) < 1e-12);
        }
    }

    #[test]
    fn test_xy_quarter_pi() {
        let theta = PI / 4.0;
        let block = InteractionModel::Xy.block(&WalkParameters::from_theta(theta));
        let c = Complex64::new(theta.cos(), 0.0);
        let s = Complex64::new(0.0, -theta.sin());
        let expected = Unitary2x2::new(c, s, s, c);
        assert!(block.distance(&expected) < 1e-9);
    }

    #[test]
    fn test_xy_block_is_rx_double_angle() {
        let params = WalkParameters::from_theta(0.37);
        let block = InteractionModel::Xy.block(&params);
        assert!(block.distance(&Unitary2x2::rx(2.0 * params.theta)) < 1e-12);
    }

    #[test]
    fn test_heisenberg_half_pi_swaps() {
        // θ = π/2 gives ζ = -1: a full swap of the two nodes.
        let block = InteractionModel::Heisenberg.block(&WalkParameters::from_theta(PI / 2.0));
        assert!(block.distance(&Unitary2x2::x()) < 1e-12);
    }

    #[test]
    fn test_two_node_gate_embeds_block() {
        let params = WalkParameters::from_theta(0.8);
        let gate = InteractionModel::Heisenberg.two_node_gate(&params).unwrap();
        let block = InteractionModel::Heisenberg.block(&params);
        assert_eq!(gate.num_qubits, 2);
        assert_eq!(gate.entry(0, 0), Complex64::new(1.0, 0.0));
        assert_eq!(gate.entry(3, 3), Complex64::new(1.0, 0.0));
        assert_eq!(gate.entry(1, 2), block.data[1]);
        assert_eq!(gate.entry(2, 1), block.data[2]);
        assert_eq!(gate.entry(0, 3), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_controlled_gate_shapes() {
        let params = WalkParameters::from_theta(0.5);
        let heis = InteractionModel::Heisenberg.controlled_gate(&params).unwrap();
        assert_eq!(heis.name(), "cU");
        assert_eq!(heis.num_qubits(), 2);
        let xy = InteractionModel::Xy.controlled_gate(&params).unwrap();
        assert!(matches!(xy.kind, GateKind::Standard(StandardGate::CRx(a)) if (a - 1.0).abs() < 1e-15));
    }

    proptest! {
        #[test]
        fn prop_blocks_unitary(theta in -10.0f64..10.0) {
            let params = WalkParameters::from_theta(theta);
            for model in MODELS {
                prop_assert!(model.block(&params).is_unitary(1e-9));
            }
        }
    }
}
