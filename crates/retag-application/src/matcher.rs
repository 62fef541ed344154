// SPDX-License-Identifier: GPL-3.0-or-later

//! Query normalization and candidate scoring.
//!
//! The filename is an unreliable source: separators, track numbers, noise
//! tokens. [`build_query`] strips the noise; [`select_best_match`] scores
//! the catalog's candidates by token coverage and picks one winner.

use retag_domain::CandidateTrack;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("search returned no candidates for query {query:?}")]
    NoCandidates { query: String },
}

/// A candidate with its computed confidence score.
///
/// `score` is the count of query tokens found in the candidate's normalized
/// text (so it is at most the token count); `length` is the character count
/// of that text. Both exist only for the duration of one matching call.
#[derive(Debug, Clone)]
struct ScoredCandidate {
    score: usize,
    length: usize,
    track: CandidateTrack,
}

/// Derive a search query from a raw filename.
///
/// Tokenizes on whitespace, drops tokens of one character or less (lone
/// separators, disc numbers), and joins the rest with single spaces in the
/// original order. May legitimately come out empty; the catalog then returns
/// an empty or junk page and matching fails downstream.
pub fn build_query(filename: &str) -> String {
    filename
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .collect::<Vec<_>>()
        .join(" ")
}

fn check_tokens(filename: &str) -> Vec<String> {
    filename
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(|token| token.to_lowercase())
        .collect()
}

/// Pick the single best candidate for `filename`, or fail if there are none.
///
/// Each candidate's haystack is the lower-cased "artists, joined - track
/// name" text; its score counts how many query tokens appear in it as plain
/// substrings (not word-bounded: the token "art" matches "heart").
///
/// A non-empty candidate set never fails, but the winner can carry a score
/// of zero — in the worst case the zero-valued sentinel's (default) track
/// data comes back. Callers must treat a zero score as no confidence.
pub fn select_best_match(
    filename: &str,
    candidates: Vec<CandidateTrack>,
) -> Result<CandidateTrack, MatchError> {
    if candidates.is_empty() {
        return Err(MatchError::NoCandidates {
            query: build_query(filename),
        });
    }

    let tokens = check_tokens(filename);

    let mut scored = Vec::with_capacity(candidates.len());
    for (index, track) in candidates.into_iter().enumerate() {
        let haystack = format!("{} {}", track.artist_line(), track.name).to_lowercase();
        let length = haystack.chars().count();
        let score = tokens
            .iter()
            .filter(|token| haystack.contains(token.as_str()))
            .count();

        debug!(
            target: "matcher",
            index,
            candidate = %track,
            score,
            length,
            "scored candidate"
        );

        scored.push(ScoredCandidate {
            score,
            length,
            track,
        });
    }

    // Winner selection starts from the zero-valued sentinel. On a score tie
    // the candidate's length is compared against the best *score*, not the
    // best length; this exact rule is pinned by
    // tie_break_compares_length_against_best_score.
    let mut best = ScoredCandidate {
        score: 0,
        length: 0,
        track: CandidateTrack::default(),
    };
    for candidate in scored {
        if candidate.score == best.score {
            if candidate.length < best.score {
                best = candidate;
            }
        } else if candidate.score > best.score {
            best = candidate;
        }
    }

    if best.score == 0 {
        warn!(
            target: "matcher",
            filename,
            "no candidate matched any query token; selection carries no confidence"
        );
    } else {
        debug!(
            target: "matcher",
            winner = %best.track,
            score = best.score,
            "selected best match"
        );
    }

    Ok(best.track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::track;

    #[test]
    fn build_query_drops_short_tokens_and_preserves_order() {
        assert_eq!(
            build_query("a Daft Punk - One More Time.mp3"),
            "Daft Punk One More Time.mp3"
        );
    }

    #[test]
    fn build_query_of_only_noise_is_empty() {
        assert_eq!(build_query("a - b 1 ~"), "");
        assert_eq!(build_query(""), "");
        assert_eq!(build_query("   "), "");
    }

    #[test]
    fn build_query_collapses_whitespace_runs() {
        assert_eq!(build_query("Aphex   Twin\tXtal"), "Aphex Twin Xtal");
    }

    #[test]
    fn empty_candidate_set_is_no_candidates() {
        let result = select_best_match("Aphex Twin Xtal", Vec::new());
        assert!(matches!(result, Err(MatchError::NoCandidates { .. })));
    }

    #[test]
    fn no_candidates_error_carries_the_normalized_query() {
        let result = select_best_match("a Daft Punk", Vec::new());
        match result {
            Err(MatchError::NoCandidates { query }) => assert_eq!(query, "Daft Punk"),
            Ok(track) => panic!("unexpected match: {}", track),
        }
    }

    #[test]
    fn strictly_higher_token_coverage_wins_regardless_of_position() {
        let candidates = vec![
            track("Xtal (remix)", &["Somebody Else"]),
            track("Unrelated", &["Nobody"]),
            track("Xtal", &["Aphex Twin"]),
        ];

        let winner = select_best_match("Aphex Twin Xtal", candidates).expect("match");
        assert_eq!(winner.artist_line(), "Aphex Twin");
        assert_eq!(winner.name, "Xtal");
    }

    #[test]
    fn first_of_equally_scored_candidates_is_kept() {
        // Both score 1; the second is much shorter. Replacement on a tie
        // requires length < best score (1), which a real haystack never
        // satisfies, so the earlier candidate stays.
        let candidates = vec![
            track("Xtal (2005 remastered version)", &["Aphex Twin Tribute Ensemble"]),
            track("Xtal", &["X"]),
        ];

        let winner = select_best_match("Xtal", candidates).expect("match");
        assert_eq!(winner.artist_line(), "Aphex Twin Tribute Ensemble");
    }

    #[test]
    fn tie_break_compares_length_against_best_score() {
        // Pins the literal tie-break rule: candidate.length < best.score,
        // not best.length. Both candidates score 2; the second has far
        // shorter text, but 11 is not below the best score of 2, so the
        // intuitive "shorter text wins" outcome must NOT happen.
        let long = track("One More Time", &["Daft Punk feat. Romanthony"]);
        let short = track("One More", &["dp"]);

        let winner = select_best_match("One More", vec![long.clone(), short]).expect("match");
        assert_eq!(winner, long);
    }

    #[test]
    fn all_zero_scores_returns_the_sentinel_track() {
        // A candidate that matches no token cannot displace the sentinel:
        // its length is never below the sentinel score of zero.
        let candidates = vec![track("Completely Different", &["Someone"])];
        let winner = select_best_match("xyzzy", candidates).expect("match");
        assert_eq!(winner, CandidateTrack::default());
    }

    #[test]
    fn substring_containment_is_not_word_bounded() {
        let candidates = vec![track("Heart of Glass", &["Blondie"])];
        let winner = select_best_match("art glass", candidates).expect("match");
        assert_eq!(winner.name, "Heart of Glass");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let candidates = vec![track("XTAL", &["APHEX TWIN"])];
        let winner = select_best_match("aphex twin xtal", candidates).expect("match");
        assert_eq!(winner.name, "XTAL");
    }
}
