use anyhow::{Context, Result, bail};

use crate::cache::FromArgs;
use crate::value::Value;

/// Sums of each blank-line separated group, in input order.
fn group_totals(input: &str) -> Result<Vec<i64>> {
    let mut totals = Vec::new();
    let mut current = None;
    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            totals.extend(current.take());
            continue;
        }
        let calories: i64 = line
            .parse()
            .with_context(|| format!("line {}: `{line}` is not a number", index + 1))?;
        *current.get_or_insert(0) += calories;
    }
    totals.extend(current);
    Ok(totals)
}

/// Part 1: the largest group total. Part 2: the sum of the three largest.
pub fn solve(input: &str, part: i64) -> Result<i64> {
    let mut totals = group_totals(input)?;
    totals.sort_unstable_by(|a, b| b.cmp(a));
    match part {
        1 => totals.first().copied().context("input has no groups"),
        2 => Ok(totals.iter().take(3).sum()),
        other => bail!("calorie_counting has no part {other}"),
    }
}

fn cached(args: &[Value]) -> Result<Value> {
    let (input, part) = <(String, i64)>::from_args(args)?;
    solve(&input, part).map(Value::from)
}

crate::cacheable!("calorie_counting", cached);
