//! Content-based hashing for run IDs.

use sha2::{Digest, Sha256};
use tj_project::schema::PhaseDef;

/// Run ID over everything the solution depends on: the full phase
/// definition plus the solver version. Any edit to either produces a
/// fresh ID, so cached runs never go stale silently.
pub fn compute_run_id(phase: &PhaseDef, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let phase_json = serde_json::to_string(phase).unwrap_or_default();
    hasher.update(phase_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tj_project::schema::*;

    fn phase(name: &str, num_segments: usize) -> PhaseDef {
        PhaseDef {
            id: "phase0".to_string(),
            name: name.to_string(),
            transcription: "gauss-lobatto".to_string(),
            num_segments,
            order: 3,
            compressed: true,
            time: TimeDef {
                fix_initial: true,
                initial_s: 0.0,
                duration_bounds_s: Some((0.5, 10.0)),
                duration_guess_s: Some(2.0),
            },
            states: vec![],
            controls: vec![],
            parameters: vec![],
            objective: None,
        }
    }

    #[test]
    fn hash_stability() {
        let def = phase("descent", 8);

        let hash1 = compute_run_id(&def, "v1");
        let hash2 = compute_run_id(&def, "v1");

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let base = phase("descent", 8);
        let refined = phase("descent", 16);

        assert_ne!(compute_run_id(&base, "v1"), compute_run_id(&refined, "v1"));
        assert_ne!(compute_run_id(&base, "v1"), compute_run_id(&base, "v2"));
    }
}
