// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{arg, command, value_parser};
use itertools::Itertools;
use miette::{miette, Result};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;

use planar::{Dimensioned, Dimensions, Matrix3D, Transform};

fn main() -> Result<()> {
    let matches = command!()
        .arg(
            arg!(-p --planes <PLANES> "Number of planes")
                .value_parser(value_parser!(usize))
                .default_value("2"),
        )
        .arg(
            arg!(-r --rows <ROWS> "Rows in each plane")
                .value_parser(value_parser!(usize))
                .default_value("3"),
        )
        .arg(
            arg!(-c --columns <COLUMNS> "Columns in each plane")
                .value_parser(value_parser!(usize))
                .default_value("4"),
        )
        .arg(arg!(-v --verbose ... "Log more detail, repeat for more"))
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| miette!("could not install log subscriber: {e}"))?;

    let planes = matches.get_one::<usize>("planes").copied().unwrap_or(2);
    let rows = matches.get_one::<usize>("rows").copied().unwrap_or(3);
    let columns = matches.get_one::<usize>("columns").copied().unwrap_or(4);

    let dimensions = Dimensions::_3D {
        planes,
        rows,
        columns,
    }
    .normalized();
    let size = dimensions
        .checked_size()
        .ok_or_else(|| miette!("a {dimensions} matrix has too many cells"))?;
    let cells = (0i64..).take(size).collect();
    let m = Matrix3D::from_vec(planes, rows, columns, cells)?;
    info!(dimensions = %m.dimensions(), size = m.size(), "built matrix");
    if m.is_null() {
        warn!("matrix is null, nothing to show");
        return Ok(());
    }

    println!("{m}");

    let doubled = m.transform(|&x| x as f64 * 2.0);
    println!("doubled:\n{doubled}");

    let first = m.plane(0);
    if first.rows() > 2 && first.columns() > 2 {
        let interior = first.slice(1..=first.rows() - 2, 1..=first.columns() - 2);
        println!("interior of plane 0:\n{interior}");
    } else {
        debug!(rows = first.rows(), columns = first.columns(), "plane 0 has no interior");
    }

    match Matrix3D::<u8>::try_convert_from(&m) {
        Ok(narrow) => debug!(size = narrow.size(), "every cell fits in a byte"),
        Err(e) => warn!(%e, "some cells do not fit in a byte"),
    }

    println!("order: {}", m.iter().join(" "));
    println!("reversed: {}", m.iter().rev().join(" "));
    Ok(())
}
