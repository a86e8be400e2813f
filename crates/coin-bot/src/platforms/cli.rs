//! Interactive terminal session

use crate::bot::CoinBot;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "coin> ";

/// Terminal front end: one line in, one reply out
pub struct CliBot {
    router: CoinBot,
}

impl CliBot {
    pub fn new(router: CoinBot) -> Self {
        Self { router }
    }

    /// Run against the process's stdin and stdout
    pub async fn run(&self) -> io::Result<()> {
        let stdin = io::stdin();
        self.run_with(stdin.lock(), io::stdout()).await
    }

    /// Read lines until EOF or `/exit`, writing each reply to `output`
    pub async fn run_with<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}", banner())?;

        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output, "\nGoodbye!")?;
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "/exit" | "/quit") {
                writeln!(output, "Goodbye!")?;
                break;
            }

            match self.router.handle(line).await {
                Some(reply) => writeln!(output, "{}\n", reply.content)?,
                None => writeln!(output, "Unknown command. Try /help\n")?,
            }
        }

        Ok(())
    }
}

fn banner() -> String {
    [
        "Crypto Signal Bot",
        "  /price <coin>    price report",
        "  /analyze <coin>  same report",
        "  /search <term>   find coin ids",
        "  /help            show help",
        "  /exit            quit",
        "Or just type a coin name or symbol.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CoinListing, MockMarketData, PriceQuote};
    use crate::config::BotConfig;
    use crate::interface::BotPlatform;
    use std::io::Cursor;
    use std::sync::Arc;

    fn cli() -> CliBot {
        let mut mock = MockMarketData::new();
        mock.expect_coin_list()
            .returning(|| Ok(vec![CoinListing::new("solana", "sol", "Solana")]));
        mock.expect_simple_price()
            .returning(|id| Ok(Some(PriceQuote::new(id, 100.0, Some(-6.0), 4.5e10))));
        let router = CoinBot::new(Arc::new(mock), &BotConfig::default(), BotPlatform::Cli);
        CliBot::new(router)
    }

    async fn session(input: &str) -> String {
        let mut out = Vec::new();
        cli().run_with(Cursor::new(input), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_session_prints_report() {
        let out = session("sol\n/exit\nbtc\n").await;
        assert!(out.contains("Price: $100.0000"));
        assert!(out.contains("SELL"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[tokio::test]
    async fn test_unknown_command_hint_and_eof() {
        let out = session("\n/watch sol\n").await;
        assert!(out.contains("Unknown command"));
        assert!(out.contains("Goodbye!"));
    }
}
