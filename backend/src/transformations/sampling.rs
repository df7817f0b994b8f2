/// Keep at most `max_rows` rows using an evenly strided, deterministic sample.
///
/// Rows are kept in their original order. When `rows.len() <= max_rows` the
/// input is returned unchanged; a limit of 0 keeps nothing.
pub fn limit_rows<T>(rows: Vec<T>, max_rows: usize) -> Vec<T> {
    let total = rows.len();
    if total <= max_rows {
        return rows;
    }
    if max_rows == 0 {
        return Vec::new();
    }

    // Row k of the sample is floor(k * total / max_rows); strictly increasing
    // because total > max_rows.
    let mut next_pick = 0usize;
    let mut picked = 0usize;
    let mut sampled = Vec::with_capacity(max_rows);

    for (i, row) in rows.into_iter().enumerate() {
        if picked == max_rows {
            break;
        }
        if i == next_pick {
            sampled.push(row);
            picked += 1;
            next_pick = ((picked as u128 * total as u128) / max_rows as u128) as usize;
        }
    }

    sampled
}

#[cfg(test)]
mod tests {
    use super::limit_rows;

    #[test]
    fn test_under_limit_is_unchanged() {
        let rows = vec![1, 2, 3];
        assert_eq!(limit_rows(rows.clone(), 3), rows);
        assert_eq!(limit_rows(rows.clone(), 10), rows);
    }

    #[test]
    fn test_exact_count_and_order() {
        let rows: Vec<usize> = (0..10).collect();
        let sampled = limit_rows(rows, 4);

        assert_eq!(sampled.len(), 4);
        assert_eq!(sampled, vec![0, 2, 5, 7]);
    }

    #[test]
    fn test_sample_is_deterministic() {
        let rows: Vec<usize> = (0..5000).collect();
        assert_eq!(limit_rows(rows.clone(), 1000), limit_rows(rows, 1000));
    }

    #[test]
    fn test_large_sample_spans_input() {
        let rows: Vec<usize> = (0..5000).collect();
        let sampled = limit_rows(rows, 1000);

        assert_eq!(sampled.len(), 1000);
        assert_eq!(sampled[0], 0);
        assert_eq!(sampled[999], 4995);
        assert!(sampled.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_limit() {
        assert!(limit_rows(vec![1, 2, 3], 0).is_empty());
    }
}
