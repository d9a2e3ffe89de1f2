//! Rendering of generated wallets for the terminal.

use std::str::FromStr;

use serde::Serialize;
use zeroize::Zeroizing;

use crate::crypto::Wallet;

/// How wallets are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One labelled block per wallet
    #[default]
    Text,
    /// A JSON array of wallet records
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Use EIP-55 casing for the address in text output
    pub checksum: bool,
    pub show_public_key: bool,
}

#[derive(Serialize)]
struct WalletRecord<'a> {
    address: String,
    checksum_address: String,
    private_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
}

/// Renders wallets in the requested format.
///
/// The returned buffer holds private keys and is wiped when dropped.
pub fn render(
    wallets: &[Wallet],
    options: RenderOptions,
) -> serde_json::Result<Zeroizing<String>> {
    let keys: Vec<Zeroizing<String>> = wallets.iter().map(Wallet::private_key_hex).collect();

    match options.format {
        OutputFormat::Text => Ok(render_text(wallets, &keys, options)),
        OutputFormat::Json => {
            let records: Vec<WalletRecord<'_>> = wallets
                .iter()
                .zip(&keys)
                .map(|(wallet, key)| WalletRecord {
                    address: wallet.address().to_string(),
                    checksum_address: wallet.address().to_checksum(),
                    private_key: key.as_str(),
                    public_key: options
                        .show_public_key
                        .then(|| wallet.public_key().to_hex()),
                })
                .collect();
            serde_json::to_string_pretty(&records).map(Zeroizing::new)
        }
    }
}

fn render_text(
    wallets: &[Wallet],
    keys: &[Zeroizing<String>],
    options: RenderOptions,
) -> Zeroizing<String> {
    let mut out = Zeroizing::new(String::new());

    for (index, (wallet, key)) in wallets.iter().zip(keys).enumerate() {
        let address = if options.checksum {
            wallet.address().to_checksum()
        } else {
            wallet.address().to_string()
        };

        if wallets.len() > 1 {
            out.push_str(&format!("=== Wallet #{} ===\n", index + 1));
        }
        push_line(&mut out, "Address:     ", &address);
        push_line(&mut out, "Private Key: ", key);
        if options.show_public_key {
            push_line(&mut out, "Public Key:  ", &wallet.public_key().to_hex());
        }
        if index + 1 < wallets.len() {
            out.push('\n');
        }
    }

    out
}

// Key text must not pass through an unwiped temporary.
fn push_line(out: &mut String, label: &str, value: &str) {
    out.push_str(label);
    out.push_str(value);
    out.push('\n');
}
