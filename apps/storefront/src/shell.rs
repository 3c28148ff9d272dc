//! # Shell
//!
//! Line-oriented front end: one command per line in, one JSON document per
//! line out. This is the process boundary a UI (or a person) drives.
//!
//! ## Commands
//! ```text
//! products          list the catalog with per-row cart state
//! cart              show the cart
//! add <id>          add one unit (respects stock)
//! dec <id>          remove one unit
//! remove <id>       drop the product from the cart
//! toggle <id>       the product list button: add if absent, else remove
//! clear             empty the cart
//! checkout          preview the order
//! confirm           confirm the order and start a new session
//! help              list commands
//! quit              exit
//! ```
//!
//! ## Output
//! ```json
//! {"ok":true,"data":{...}}
//! {"ok":false,"error":{"code":"NOT_FOUND","message":"Product not found: 4"}}
//! ```

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use serde_json::json;
use storefront_core::ProductId;
use tracing::debug;

use crate::error::ApiError;
use crate::Storefront;

/// Help text, one entry per command.
pub const HELP: &[&str] = &[
    "products          list the catalog with per-row cart state",
    "cart              show the cart",
    "add <id>          add one unit (respects stock)",
    "dec <id>          remove one unit",
    "remove <id>       drop the product from the cart",
    "toggle <id>       add if absent, else remove",
    "clear             empty the cart",
    "checkout          preview the order",
    "confirm           confirm the order and start a new session",
    "help              list commands",
    "quit              exit",
];

/// A parsed shell line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Products,
    Cart,
    Add(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
    Toggle(ProductId),
    Clear,
    Checkout,
    Confirm,
    Help,
    Quit,
}

fn parse_product_id(verb: &str, arg: Option<&str>) -> Result<ProductId, ApiError> {
    let raw = arg.ok_or_else(|| ApiError::validation(format!("Usage: {} <product id>", verb)))?;
    raw.parse::<u32>()
        .map(ProductId::new)
        .map_err(|_| ApiError::validation(format!("Invalid product id '{}'", raw)))
}

impl FromStr for ShellCommand {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| ApiError::validation("Empty command"))?
            .to_lowercase();
        let arg = words.next();

        if words.next().is_some() {
            return Err(ApiError::validation(format!("Too many arguments for '{}'", verb)));
        }

        let command = match verb.as_str() {
            "products" | "list" => ShellCommand::Products,
            "cart" => ShellCommand::Cart,
            "add" | "inc" => ShellCommand::Add(parse_product_id(&verb, arg)?),
            "dec" | "decrement" => ShellCommand::Decrement(parse_product_id(&verb, arg)?),
            "remove" | "rm" => ShellCommand::Remove(parse_product_id(&verb, arg)?),
            "toggle" => ShellCommand::Toggle(parse_product_id(&verb, arg)?),
            "clear" => ShellCommand::Clear,
            "checkout" => ShellCommand::Checkout,
            "confirm" => ShellCommand::Confirm,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => {
                return Err(ApiError::validation(format!(
                    "Unknown command '{}'. Type 'help' for a list.",
                    other
                )))
            }
        };

        Ok(command)
    }
}

/// Reads commands from `input` until EOF or `quit`, writing one JSON line
/// per command to `output`. Blank lines and `#` comments are skipped.
pub fn run_shell<R, W>(app: &Storefront, input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        debug!(line, "Shell input");

        let result = line.parse::<ShellCommand>().and_then(|command| {
            if command == ShellCommand::Quit {
                return Ok(None);
            }
            app.execute(command).map(Some)
        });

        let document = match result {
            Ok(None) => break,
            Ok(Some(data)) => json!({ "ok": true, "data": data }),
            Err(error) => json!({ "ok": false, "error": error }),
        };

        writeln!(output, "{}", document)?;
        output.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::{AppConfig, CatalogState};
    use serde_json::Value;
    use std::io::Cursor;

    #[test]
    fn test_parse_commands() {
        assert_eq!("products".parse::<ShellCommand>().unwrap(), ShellCommand::Products);
        assert_eq!("ADD 3".parse::<ShellCommand>().unwrap(), ShellCommand::Add(ProductId::new(3)));
        assert_eq!(
            "  dec   7 ".parse::<ShellCommand>().unwrap(),
            ShellCommand::Decrement(ProductId::new(7))
        );
        assert_eq!(
            "toggle 1".parse::<ShellCommand>().unwrap(),
            ShellCommand::Toggle(ProductId::new(1))
        );
        assert_eq!("exit".parse::<ShellCommand>().unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        let err = "add".parse::<ShellCommand>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Usage: add <product id>");

        assert!("add three".parse::<ShellCommand>().is_err());
        assert!("add -1".parse::<ShellCommand>().is_err());
        assert!("add 1 2".parse::<ShellCommand>().is_err());
        assert!("dance".parse::<ShellCommand>().is_err());
    }

    fn run_script(script: &str) -> Vec<Value> {
        let app = Storefront::with_catalog(AppConfig::default(), CatalogState::default());
        let mut output = Vec::new();
        run_shell(&app, Cursor::new(script), &mut output).unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_shopping_session_script() {
        let responses = run_script(
            "# browse, buy, confirm\n\
             products\n\
             add 3\n\
             add 3\n\
             add 7\n\
             dec 7\n\
             checkout\n\
             confirm\n\
             cart\n",
        );

        assert_eq!(responses.len(), 8);
        assert!(responses.iter().all(|r| r["ok"] == true));
        assert_eq!(responses[0]["data"]["products"].as_array().unwrap().len(), 6);
        assert_eq!(responses[3]["data"]["totalQuantity"], 3);
        assert_eq!(responses[5]["data"]["formattedTotal"], "Php 19.98");
        assert_eq!(responses[6]["data"]["grandTotal"], 1998);
        assert_eq!(responses[6]["data"]["items"].as_array().unwrap().len(), 1);
        assert_eq!(responses[7]["data"]["isEmpty"], true);
        assert_eq!(responses[7]["data"]["sessionId"], responses[6]["data"]["nextSessionId"]);
    }

    #[test]
    fn test_help_lists_every_command() {
        let responses = run_script("help\n");
        assert_eq!(responses[0]["data"].as_array().unwrap().len(), HELP.len());
    }

    #[test]
    fn test_errors_do_not_stop_the_shell() {
        let responses = run_script("add 4\nbogus\ncart\n");

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["ok"], false);
        assert_eq!(responses[0]["error"]["code"], "NOT_FOUND");
        assert_eq!(responses[1]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(responses[2]["ok"], true);
    }

    #[test]
    fn test_quit_stops_reading() {
        let responses = run_script("cart\nquit\nproducts\n");
        assert_eq!(responses.len(), 1);
    }
}
