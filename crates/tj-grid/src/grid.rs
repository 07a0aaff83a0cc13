//! Phase grid data: node positions and role subsets.

use tj_core::{Real, TjResult, linspace};

use crate::error::GridError;
use crate::transcription::{Transcription, segment_nodes};
use crate::validate;

/// Role played by a group of nodes within the grid.
///
/// Subsets are enumerated rather than named by strings, so a caller cannot
/// ask a grid for a subset it does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeSubset {
    /// Every node, in phase-time order.
    All,
    /// Nodes where state values are discretized.
    StateDisc,
    /// State discretization nodes that remain independent inputs
    /// (compressed grids share segment-boundary values).
    StateInput,
    /// Nodes where control values are discretized.
    ControlDisc,
    /// Control discretization nodes that remain independent inputs.
    ControlInput,
    /// Collocation nodes interior to the discretization pattern.
    Col,
    /// First and last node of each segment.
    SegmentEnds,
}

impl NodeSubset {
    pub const COUNT: usize = 7;

    pub const ALL: [NodeSubset; Self::COUNT] = [
        NodeSubset::All,
        NodeSubset::StateDisc,
        NodeSubset::StateInput,
        NodeSubset::ControlDisc,
        NodeSubset::ControlInput,
        NodeSubset::Col,
        NodeSubset::SegmentEnds,
    ];

    /// Slot in the grid's subset table.
    pub(crate) fn slot(self) -> usize {
        match self {
            NodeSubset::All => 0,
            NodeSubset::StateDisc => 1,
            NodeSubset::StateInput => 2,
            NodeSubset::ControlDisc => 3,
            NodeSubset::ControlInput => 4,
            NodeSubset::Col => 5,
            NodeSubset::SegmentEnds => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeSubset::All => "all",
            NodeSubset::StateDisc => "state_disc",
            NodeSubset::StateInput => "state_input",
            NodeSubset::ControlDisc => "control_disc",
            NodeSubset::ControlInput => "control_input",
            NodeSubset::Col => "col",
            NodeSubset::SegmentEnds => "segment_ends",
        }
    }
}

impl std::fmt::Display for NodeSubset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The grid: a validated, immutable description of one phase's nodes.
///
/// Holds every node's position in segment-local tau and phase-wide tau,
/// which segment owns it, and the index subsets for each [`NodeSubset`].
/// Built once when a phase is configured and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct GridData {
    transcription: Transcription,
    num_segments: usize,
    order: usize,
    compressed: bool,

    /// Segment boundaries in phase tau, len `num_segments + 1`, from -1 to 1.
    segment_bounds: Vec<Real>,

    pub(crate) node_stau: Vec<Real>,
    pub(crate) node_ptau: Vec<Real>,
    pub(crate) node_segment: Vec<usize>,

    /// Index subsets, one slot per [`NodeSubset`].
    pub(crate) subsets: [Vec<usize>; NodeSubset::COUNT],
}

impl GridData {
    /// Build and validate the grid for `num_segments` equal-width segments.
    pub fn new(
        transcription: Transcription,
        num_segments: usize,
        order: usize,
        compressed: bool,
    ) -> TjResult<Self> {
        if num_segments == 0 {
            return Err(GridError::InvalidSegmentCount {
                count: num_segments,
            }
            .into());
        }
        let stau = segment_nodes(transcription, order)?;
        let nodes_per_segment = stau.len();
        let segment_bounds = linspace(-1.0, 1.0, num_segments + 1)?;

        let n = num_segments * nodes_per_segment;
        let mut node_stau = Vec::with_capacity(n);
        let mut node_ptau = Vec::with_capacity(n);
        let mut node_segment = Vec::with_capacity(n);

        for seg in 0..num_segments {
            let (lo, hi) = (segment_bounds[seg], segment_bounds[seg + 1]);
            for &tau in &stau {
                // Endpoint nodes take the boundary value verbatim so shared
                // segment boundaries are bitwise-equal across segments.
                let ptau = if tau == -1.0 {
                    lo
                } else if tau == 1.0 {
                    hi
                } else {
                    lo + 0.5 * (tau + 1.0) * (hi - lo)
                };
                node_stau.push(tau);
                node_ptau.push(ptau);
                node_segment.push(seg);
            }
        }

        let subsets = build_subsets(
            transcription,
            num_segments,
            nodes_per_segment,
            order,
            compressed,
        );

        let grid = Self {
            transcription,
            num_segments,
            order,
            compressed,
            segment_bounds,
            node_stau,
            node_ptau,
            node_segment,
            subsets,
        };
        validate::check_grid(&grid)?;
        Ok(grid)
    }

    pub fn transcription(&self) -> Transcription {
        self.transcription
    }

    pub fn num_segments(&self) -> usize {
        self.num_segments
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    /// Total node count (the length of the `all` subset).
    pub fn num_nodes(&self) -> usize {
        self.node_ptau.len()
    }

    /// The ordered node indices belonging to a subset.
    pub fn subset(&self, subset: NodeSubset) -> &[usize] {
        &self.subsets[subset.slot()]
    }

    pub fn subset_len(&self, subset: NodeSubset) -> usize {
        self.subsets[subset.slot()].len()
    }

    /// Phase-tau position of every node, in node order.
    pub fn node_ptau(&self) -> &[Real] {
        &self.node_ptau
    }

    /// Segment-local tau position of every node.
    pub fn node_stau(&self) -> &[Real] {
        &self.node_stau
    }

    /// Which segment owns a node (panics if out of bounds).
    pub fn segment_of(&self, node: usize) -> usize {
        self.node_segment[node]
    }

    /// Segment boundaries in phase tau.
    pub fn segment_bounds(&self) -> &[Real] {
        &self.segment_bounds
    }

    /// Map every node's phase tau onto clock time for a phase starting at
    /// `t_initial_s` and lasting `duration_s`. Nodes sharing a ptau value
    /// get bitwise-identical times.
    pub fn node_times(&self, t_initial_s: Real, duration_s: Real) -> Vec<Real> {
        self.node_ptau
            .iter()
            .map(|&ptau| t_initial_s + 0.5 * (ptau + 1.0) * duration_s)
            .collect()
    }
}

fn build_subsets(
    transcription: Transcription,
    num_segments: usize,
    nodes_per_segment: usize,
    order: usize,
    compressed: bool,
) -> [Vec<usize>; NodeSubset::COUNT] {
    let n = num_segments * nodes_per_segment;

    let all: Vec<usize> = (0..n).collect();
    let mut state_disc = Vec::new();
    let mut control_disc = Vec::new();
    let mut col = Vec::new();
    let mut segment_ends = Vec::new();

    for seg in 0..num_segments {
        let base = seg * nodes_per_segment;
        segment_ends.push(base);
        segment_ends.push(base + nodes_per_segment - 1);
        for local in 0..nodes_per_segment {
            let node = base + local;
            control_disc.push(node);
            match transcription {
                Transcription::GaussLobatto => {
                    // Discretization and collocation alternate through the
                    // Lobatto points, starting and ending on discretization.
                    if local % 2 == 0 {
                        state_disc.push(node);
                    } else {
                        col.push(node);
                    }
                }
                Transcription::Radau => {
                    // States live at every node; the Radau points (all but
                    // the appended right endpoint) collocate.
                    state_disc.push(node);
                    if local < order {
                        col.push(node);
                    }
                }
            }
        }
    }

    let state_input = input_subset(&state_disc, nodes_per_segment, compressed);
    let control_input = input_subset(&control_disc, nodes_per_segment, compressed);

    let mut subsets: [Vec<usize>; NodeSubset::COUNT] = Default::default();
    subsets[NodeSubset::All.slot()] = all;
    subsets[NodeSubset::StateDisc.slot()] = state_disc;
    subsets[NodeSubset::StateInput.slot()] = state_input;
    subsets[NodeSubset::ControlDisc.slot()] = control_disc;
    subsets[NodeSubset::ControlInput.slot()] = control_input;
    subsets[NodeSubset::Col.slot()] = col;
    subsets[NodeSubset::SegmentEnds.slot()] = segment_ends;
    subsets
}

/// Derive an input subset from a discretization subset. Compressed grids
/// share each segment-boundary value with the preceding segment, so the
/// boundary node of every segment after the first stops being an input.
fn input_subset(disc: &[usize], nodes_per_segment: usize, compressed: bool) -> Vec<usize> {
    if !compressed {
        return disc.to_vec();
    }
    let mut in_disc = vec![false; disc.last().map_or(0, |&last| last + 1)];
    for &node in disc {
        in_disc[node] = true;
    }
    disc.iter()
        .copied()
        .filter(|&node| {
            let segment_start = node % nodes_per_segment == 0;
            !(segment_start && node > 0 && in_disc[node - 1])
        })
        .collect()
}
