//! Parsers for the two CSV input files.
//!
//! - interactions file: `user_id,app_id,rating` columns
//! - games file: `app_id,title` plus extra descriptive columns (ignored)
//!
//! Rows are matched to struct fields by header name, so column order does
//! not matter and unrelated columns in the games file are skipped.

use crate::error::{DataLoadError, Result};
use crate::types::{GameMeta, Interaction};
use std::fs::File;
use std::io::Read;
use std::path::Path;

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })
}

/// Parse the interactions CSV file
pub fn parse_interactions(path: &Path) -> Result<Vec<Interaction>> {
    let file = open(path)?;
    read_interactions(file, &path.display().to_string())
}

/// Parse the game-metadata CSV file
pub fn parse_games(path: &Path) -> Result<Vec<GameMeta>> {
    let file = open(path)?;
    read_games(file, &path.display().to_string())
}

/// Deserialize interaction rows from any reader.
///
/// Split out from [`parse_interactions`] so tests can parse in-memory data.
pub fn read_interactions<R: Read>(reader: R, file: &str) -> Result<Vec<Interaction>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut interactions = Vec::new();

    for record in rdr.deserialize() {
        let interaction: Interaction = record.map_err(|e| DataLoadError::CsvError {
            file: file.to_string(),
            source: e,
        })?;
        interactions.push(interaction);
    }

    Ok(interactions)
}

/// Deserialize metadata rows from any reader.
pub fn read_games<R: Read>(reader: R, file: &str) -> Result<Vec<GameMeta>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut games = Vec::new();

    for record in rdr.deserialize() {
        let game: GameMeta = record.map_err(|e| DataLoadError::CsvError {
            file: file.to_string(),
            source: e,
        })?;
        games.push(game);
    }

    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_interactions() {
        let data = "user_id,app_id,rating\n1,10,5.0\n1,11,3.0\n2,10,4.0\n";
        let interactions = read_interactions(data.as_bytes(), "test.csv").unwrap();

        assert_eq!(interactions.len(), 3);
        assert_eq!(interactions[0].user_id, 1);
        assert_eq!(interactions[0].app_id, 10);
        assert_eq!(interactions[0].rating, 5.0);
        assert_eq!(interactions[2].user_id, 2);
    }

    #[test]
    fn test_read_interactions_column_order_irrelevant() {
        let data = "rating,user_id,app_id\n4.5,7,99\n";
        let interactions = read_interactions(data.as_bytes(), "test.csv").unwrap();

        assert_eq!(interactions.len(), 1);
        assert_eq!(interactions[0].user_id, 7);
        assert_eq!(interactions[0].app_id, 99);
        assert_eq!(interactions[0].rating, 4.5);
    }

    #[test]
    fn test_read_games_ignores_extra_columns() {
        let data = "app_id,title,positive_ratio,price_final\n\
                    10,Counter-Strike,0.97,9.99\n\
                    20,Team Fortress Classic,0.84,4.99\n";
        let games = read_games(data.as_bytes(), "games.csv").unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].app_id, 10);
        assert_eq!(games[0].title, "Counter-Strike");
        assert_eq!(games[1].title, "Team Fortress Classic");
    }

    #[test]
    fn test_read_games_title_with_comma() {
        let data = "app_id,title\n10,\"Half-Life, Uplink\"\n";
        let games = read_games(data.as_bytes(), "games.csv").unwrap();

        assert_eq!(games[0].title, "Half-Life, Uplink");
    }

    #[test]
    fn test_read_interactions_bad_row_is_an_error() {
        let data = "user_id,app_id,rating\n1,not-a-game,5.0\n";
        let result = read_interactions(data.as_bytes(), "test.csv");

        assert!(matches!(result, Err(DataLoadError::CsvError { .. })));
    }

    #[test]
    fn test_read_interactions_empty_table() {
        let data = "user_id,app_id,rating\n";
        let interactions = read_interactions(data.as_bytes(), "test.csv").unwrap();

        assert!(interactions.is_empty());
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_interactions(Path::new("no/such/file.csv"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }
}
