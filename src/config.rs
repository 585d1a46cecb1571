use anyhow::{bail, Context};
use clap::Parser;
use engine::{Coord, DEFAULT_ROWS};

/// Triangular peg solitaire in the terminal.
///
/// Log output goes to stderr and is controlled with `RUST_LOG`.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Number of rows of the triangle
    #[arg(long, default_value_t = DEFAULT_ROWS, value_parser = clap::value_parser!(u8).range(1..=32))]
    pub rows: u8,

    /// Hole to empty before the first move, written as `x,y`
    #[arg(long, value_parser = parse_coord)]
    pub start: Option<Coord>,

    /// Print the board without colours
    #[arg(long)]
    pub no_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_ROWS,
            start: None,
            no_color: false,
        }
    }
}

/// Parse `x,y` into a coordinate. Whether it lies on the board is checked
/// by the board itself.
pub fn parse_coord(s: &str) -> anyhow::Result<Coord> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected `x,y`, got {s:?}");
    };
    let x = x.trim().parse().with_context(|| format!("invalid x in {s:?}"))?;
    let y = y.trim().parse().with_context(|| format!("invalid y in {s:?}"))?;
    Ok(Coord::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["tripeg"]).unwrap();
        assert_eq!(config.rows, 5);
        assert_eq!(config.start, None);
        assert!(!config.no_color);
    }

    #[test]
    fn test_flags() {
        let config =
            Config::try_parse_from(["tripeg", "--rows", "7", "--start", "1,3", "--no-color"])
                .unwrap();
        assert_eq!(config.rows, 7);
        assert_eq!(config.start, Some(Coord::new(1, 3)));
        assert!(config.no_color);
    }

    #[test]
    fn test_rows_out_of_range() {
        assert!(Config::try_parse_from(["tripeg", "--rows", "0"]).is_err());
        assert!(Config::try_parse_from(["tripeg", "--rows", "33"]).is_err());
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("2, 4").unwrap(), Coord::new(2, 4));
        assert!(parse_coord("2").is_err());
        assert!(parse_coord("a,1").is_err());
        assert!(parse_coord("-1,1").is_err());
    }
}
