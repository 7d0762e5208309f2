//! Trial ranking.

use super::types::{TuneOutcome, TuneResult, TuneTrial};

/// Ranks evaluated trials into a result collection.
///
/// Trials are taken in evaluation order. The first solved trial becomes
/// rank 0; every later solved trial that strictly reduces the best work
/// seen so far is appended. When more results accumulate than `retention`
/// allows, rank 0 is kept and the tail keeps the best of the rest, so a
/// retention of 2 yields the first solved setting plus the best setting.
pub fn rank(trials: &[TuneTrial], retention: usize) -> TuneOutcome {
    let mut ranked: Vec<TuneResult> = Vec::new();
    let mut best_work: Option<u64> = None;

    for trial in trials {
        if !trial.solved {
            continue;
        }
        let Some(objective) = trial.objective else {
            continue;
        };
        let improves = match best_work {
            None => true,
            Some(best) => trial.work < best,
        };
        if improves {
            best_work = Some(trial.work);
            ranked.push(TuneResult {
                params: trial.params.clone(),
                work: trial.work,
                objective,
            });
        }
    }

    let retention = retention.max(1);
    if ranked.len() > retention {
        let tail_start = ranked.len() - (retention - 1);
        let mut kept = vec![ranked[0].clone()];
        kept.extend(ranked[tail_start..].iter().cloned());
        ranked = kept;
    }
    TuneOutcome::new(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Param, ParamSet, ParamValue};

    fn trial(solved: bool, work: u64) -> TuneTrial {
        TuneTrial {
            params: ParamSet::new(),
            solved,
            work,
            objective: solved.then_some(1.0),
        }
    }

    #[test]
    fn test_first_solved_is_baseline() {
        let trials = [trial(false, 10), trial(true, 100), trial(true, 50)];
        let outcome = rank(&trials, 4);
        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.get(0).unwrap().work, 100);
        assert_eq!(outcome.get(1).unwrap().work, 50);
    }

    #[test]
    fn test_only_strict_improvements_rank() {
        let trials = [
            trial(true, 100),
            trial(true, 100), // equal, not an improvement
            trial(true, 120),
            trial(true, 80),
            trial(true, 90), // worse than current best
            trial(true, 40),
        ];
        let outcome = rank(&trials, 10);
        let works: Vec<u64> = outcome.iter().map(|r| r.work).collect();
        assert_eq!(works, vec![100, 80, 40]);
    }

    #[test]
    fn test_retention_keeps_baseline_and_best() {
        let trials = [trial(true, 100), trial(true, 80), trial(true, 60), trial(true, 40)];
        let outcome = rank(&trials, 2);
        let works: Vec<u64> = outcome.iter().map(|r| r.work).collect();
        assert_eq!(works, vec![100, 40]);
    }

    #[test]
    fn test_no_solved_trials() {
        let trials = [trial(false, 1), trial(false, 2)];
        assert!(rank(&trials, 2).is_empty());
    }

    #[test]
    fn test_single_result_under_retention() {
        let trials = [trial(true, 100)];
        let outcome = rank(&trials, 2);
        assert_eq!(outcome.len(), 1);
    }

    #[test]
    fn test_params_preserved() {
        let mut params = ParamSet::new();
        params.set(Param::GridPoints, ParamValue::Int(256)).unwrap();
        let trials = [TuneTrial {
            params: params.clone(),
            solved: true,
            work: 5,
            objective: Some(2.0),
        }];
        let outcome = rank(&trials, 1);
        assert_eq!(outcome.get(0).unwrap().params, params);
    }
}
