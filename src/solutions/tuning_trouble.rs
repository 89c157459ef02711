use anyhow::{Context, Result, bail};

use crate::cache::FromArgs;
use crate::value::Value;

/// Number of characters read when the last `width` are pairwise distinct.
fn marker_end(signal: &[u8], width: usize) -> Option<usize> {
    signal
        .windows(width)
        .position(|window| {
            window
                .iter()
                .enumerate()
                .all(|(index, byte)| !window[index + 1..].contains(byte))
        })
        .map(|start| start + width)
}

/// Part 1 looks for a 4-character start-of-packet marker, part 2 for a
/// 14-character start-of-message marker.
pub fn solve(input: &str, part: i64) -> Result<i64> {
    let width = match part {
        1 => 4,
        2 => 14,
        other => bail!("tuning_trouble has no part {other}"),
    };
    let end = marker_end(input.trim().as_bytes(), width)
        .with_context(|| format!("no {width}-character marker in input"))?;
    i64::try_from(end).context("marker position overflows i64")
}

fn cached(args: &[Value]) -> Result<Value> {
    let (input, part) = <(String, i64)>::from_args(args)?;
    solve(&input, part).map(Value::from)
}

crate::cacheable!("tuning_trouble", cached);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_packet_markers() {
        assert_eq!(solve("mjqjpqmgbljsphdztnvjfqwrcgsmlb", 1).expect("part 1"), 7);
        assert_eq!(solve("bvwbjplbgvbhsrlpgdmjqwftvncz\n", 1).expect("part 1"), 5);
    }

    #[test]
    fn finds_message_markers() {
        assert_eq!(solve("mjqjpqmgbljsphdztnvjfqwrcgsmlb", 2).expect("part 2"), 19);
        assert_eq!(solve("bvwbjplbgvbhsrlpgdmjqwftvncz", 2).expect("part 2"), 23);
    }

    #[test]
    fn short_or_repetitive_signals_fail() {
        assert!(solve("abc", 1).is_err());
        assert!(solve("aaaaaaaa", 1).is_err());
    }
}
