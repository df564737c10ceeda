use tabled::Table;

use crate::{
    spotify::{Difficulty, genres_for},
    types::GenreTableRow,
};

/// Prints the genre palette of one or all difficulty levels.
pub fn genres(difficulty: Option<Difficulty>) {
    let levels: Vec<Difficulty> = match difficulty {
        Some(d) => vec![d],
        None => Difficulty::ALL.to_vec(),
    };

    let rows: Vec<GenreTableRow> = levels
        .into_iter()
        .map(|d| GenreTableRow {
            difficulty: d.to_string(),
            genres: genres_for(d).as_slice().join(", "),
        })
        .collect();

    println!("{}", Table::new(rows));
}
