//! services/api/src/bin/openapi.rs
//!
//! Prints the OpenAPI document of the marketplace API to stdout, or writes it
//! to the file named by the first argument (`-` also means stdout).

use std::io::Write;

use api_lib::web::rest::ApiDoc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let document = ApiDoc::document().to_pretty_json()?;

    match std::env::args().nth(1).as_deref() {
        None | Some("-") => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", document)?;
        }
        Some(path) => {
            std::fs::write(path, document)?;
            eprintln!("Wrote OpenAPI document to {}", path);
        }
    }
    Ok(())
}
