use std::fmt::Display;
use itertools::Itertools;

pub fn fil_value(v: f64) -> String {
    if v.is_infinite() {
        "∞".into()
    } else {
        let s = format!("{v:.4}");
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s.is_empty() { "0".into() } else { s.to_string() }
    }
}

pub fn table<S, I, J, I1, I2, D, F>(head: S, rows: I1, cols: I2, entry: F) -> String
where
    S: Display,
    I: Display,
    J: Display,
    I1: Iterator<Item = I>,
    I2: Iterator<Item = J>,
    D: Display,
    F: Fn(&I, &J) -> D
{
    use prettytable::*;

    let rows = rows.collect_vec();
    let cols = cols.collect_vec();

    fn row<I>(head: String, cols: I) -> Row
    where I: Iterator<Item = String> {
        let mut cells = vec![Cell::new(head.as_str())];
        cells.extend(cols.map(|str| Cell::new(str.as_str())));
        Row::new(cells)
    }

    let mut table = Table::new();

    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row(
        head.to_string(),
        cols.iter().map(|j| j.to_string())
    ));

    for i in rows.iter() {
        table.add_row(row(
            i.to_string(),
            cols.iter().map(|j| format!("{}", entry(i, j)))
        ));
    }

    table.to_string()
}
