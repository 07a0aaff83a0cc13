//! Collocation transcriptions and their per-segment node tables.

use tj_core::Real;

use crate::error::GridError;

/// Discretization scheme mapping a continuous phase onto collocation nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transcription {
    /// Legendre-Gauss-Lobatto nodes; states discretized at endpoints and
    /// alternating interior nodes, collocated between them.
    GaussLobatto,
    /// Left-Radau nodes plus the right segment endpoint; states discretized
    /// everywhere, collocated at the Radau points.
    Radau,
}

impl Transcription {
    pub fn as_str(self) -> &'static str {
        match self {
            Transcription::GaussLobatto => "gauss-lobatto",
            Transcription::Radau => "radau-ps",
        }
    }

    /// Parse the scheme names used in project files.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gauss-lobatto" => Some(Transcription::GaussLobatto),
            "radau-ps" => Some(Transcription::Radau),
            _ => None,
        }
    }
}

impl std::fmt::Display for Transcription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Legendre-Gauss-Lobatto points on [-1, 1]. Interior values are the roots
// of P'_{n-1}; tabulated rather than computed since only the small odd
// orders used by phase grids are supported.
const LGL_3: [Real; 3] = [-1.0, 0.0, 1.0];
const LGL_5: [Real; 5] = [
    -1.0,
    -0.654_653_670_707_977_1,
    0.0,
    0.654_653_670_707_977_1,
    1.0,
];
const LGL_7: [Real; 7] = [
    -1.0,
    -0.830_223_896_278_566_9,
    -0.468_848_793_470_714_2,
    0.0,
    0.468_848_793_470_714_2,
    0.830_223_896_278_566_9,
    1.0,
];

// Left-Radau points on [-1, 1): the left endpoint plus the roots of
// (P_{n-1} + P_n)/(1 + x). The right endpoint is appended separately by
// the Radau grid builder.
const LGR_2: [Real; 2] = [-1.0, 1.0 / 3.0];
const LGR_3: [Real; 3] = [
    -1.0,
    -0.289_897_948_556_635_6,
    0.689_897_948_556_635_6,
];
const LGR_4: [Real; 4] = [
    -1.0,
    -0.575_318_923_521_694_1,
    0.181_066_271_118_530_56,
    0.822_824_080_974_592_1,
];

/// The segment-local node positions (stau) for one segment of the given
/// scheme and order, left to right. For Radau this includes the appended
/// right endpoint, so the segment has `order + 1` nodes.
pub fn segment_nodes(transcription: Transcription, order: usize) -> Result<Vec<Real>, GridError> {
    match transcription {
        Transcription::GaussLobatto => {
            let table: &[Real] = match order {
                3 => &LGL_3,
                5 => &LGL_5,
                7 => &LGL_7,
                _ => {
                    return Err(GridError::UnsupportedOrder {
                        scheme: Transcription::GaussLobatto.as_str(),
                        order,
                    });
                }
            };
            Ok(table.to_vec())
        }
        Transcription::Radau => {
            let table: &[Real] = match order {
                2 => &LGR_2,
                3 => &LGR_3,
                4 => &LGR_4,
                _ => {
                    return Err(GridError::UnsupportedOrder {
                        scheme: Transcription::Radau.as_str(),
                        order,
                    });
                }
            };
            let mut nodes = table.to_vec();
            nodes.push(1.0);
            Ok(nodes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauss_lobatto_order_3() {
        let nodes = segment_nodes(Transcription::GaussLobatto, 3).unwrap();
        assert_eq!(nodes, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn radau_order_3_has_appended_endpoint() {
        let nodes = segment_nodes(Transcription::Radau, 3).unwrap();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0], -1.0);
        assert_eq!(nodes[3], 1.0);
        // interior Radau points: (1 -/+ sqrt(6))/5
        assert!((nodes[1] + 0.289_897_948_556_635_6).abs() < 1e-15);
        assert!((nodes[2] - 0.689_897_948_556_635_6).abs() < 1e-15);
    }

    #[test]
    fn nodes_are_sorted_and_bounded() {
        for (t, orders) in [
            (Transcription::GaussLobatto, &[3_usize, 5, 7][..]),
            (Transcription::Radau, &[2, 3, 4][..]),
        ] {
            for &k in orders {
                let nodes = segment_nodes(t, k).unwrap();
                assert!(nodes.windows(2).all(|w| w[0] < w[1]), "{t} order {k}");
                assert_eq!(nodes[0], -1.0);
                assert!(*nodes.last().unwrap() <= 1.0);
            }
        }
    }

    #[test]
    fn unsupported_order_is_rejected() {
        assert!(matches!(
            segment_nodes(Transcription::GaussLobatto, 4),
            Err(GridError::UnsupportedOrder { .. })
        ));
        assert!(matches!(
            segment_nodes(Transcription::Radau, 9),
            Err(GridError::UnsupportedOrder { .. })
        ));
    }

    #[test]
    fn parse_round_trips() {
        for t in [Transcription::GaussLobatto, Transcription::Radau] {
            assert_eq!(Transcription::parse(t.as_str()), Some(t));
        }
        assert_eq!(Transcription::parse("hermite"), None);
    }
}
