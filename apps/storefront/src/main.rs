//! # Storefront Entry Point
//!
//! Reads one command per line from stdin and prints one JSON response per
//! line to stdout. Logs go to stderr.
//!
//! ```text
//! $ echo -e "add 3\ncheckout" | storefront
//! {"ok":true,"data":{"sessionId":"...","items":[...],"grandTotal":999,...}}
//! {"ok":true,"data":{"sessionId":"...","storeName":"Storefront Demo",...}}
//! ```

fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(e) = storefront_lib::run() {
        eprintln!("storefront: {}", e);
        std::process::exit(1);
    }
}
