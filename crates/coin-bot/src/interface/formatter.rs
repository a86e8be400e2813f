//! Response formatting utilities
//!
//! Every reply template lives in the provided methods of [`Formatter`];
//! implementations only decide how bold text, code spans and escaping look
//! on their platform.

use crate::api::PriceQuote;
use crate::interface::BotPlatform;
use crate::signal::Signal;

/// Tickers suggested when a lookup fails
pub const EXAMPLE_TICKERS: &[&str] = &[
    "bitcoin", "ETH", "solana", "ADA", "DOT", "shib", "doge", "matic", "avax",
];

pub trait Formatter: Send + Sync {
    fn platform(&self) -> BotPlatform;

    /// Make text stand out
    fn bold(&self, text: &str) -> String;

    /// Render text verbatim, e.g. a command or ticker
    fn code(&self, text: &str) -> String;

    /// Neutralize characters the platform would read as markup
    fn escape(&self, text: &str) -> String;

    /// Full price report for one coin
    fn format_report(&self, coin_id: &str, quote: &PriceQuote, signal: &Signal) -> String {
        let change = quote.change_or_zero();
        let trend = if change >= 0.0 { "📈" } else { "📉" };
        let hashtag = coin_id.replace('-', "_");

        format!(
            "{trend} {title} Analysis Report\n\
             \n\
             💰 {price_label} {price}\n\
             📊 {change_label} {change:+.2}%\n\
             🏦 {cap_label} {cap}\n\
             \n\
             🎯 {signal_label} {emoji} {label}\n\
             📈 {analysis_label} {rationale}\n\
             \n\
             💡 {outlook_label}\n\
             {outlook}\n\
             \n\
             ⚡ {risk_label} {risk}\n\
             \n\
             📊 {levels_label}\n\
             Resistance: {resistance}\n\
             Support: {support}\n\
             \n\
             #️⃣ #{hashtag} #Crypto #Trading",
            title = self.bold(&self.escape(&coin_id.to_uppercase())),
            price_label = self.bold("Price:"),
            price = format_usd(quote.price, 4),
            change_label = self.bold("24h Change:"),
            cap_label = self.bold("Market Cap:"),
            cap = format_market_cap(quote.market_cap),
            signal_label = self.bold("Trading Signal:"),
            emoji = signal.kind.emoji(),
            label = self.escape(&signal.label()),
            analysis_label = self.bold("Market Analysis:"),
            rationale = self.escape(&signal.rationale()),
            outlook_label = self.bold("Technical Outlook:"),
            outlook = signal.outlook.describe(),
            risk_label = self.bold("Risk Level:"),
            risk = signal.risk,
            levels_label = self.bold("Support/Resistance:"),
            resistance = format_usd(quote.price * 1.05, 2),
            support = format_usd(quote.price * 0.95, 2),
            hashtag = self.escape(&hashtag),
        )
    }

    fn format_welcome(&self) -> String {
        format!(
            "🚀 {}\n\n\
             I can analyze any cryptocurrency:\n\
             • Real-time prices\n\
             • Trading signals\n\
             • Market analysis\n\
             • Risk assessment\n\n\
             {}\n\n\
             💎 Examples: {}",
            self.bold("Welcome to the Crypto Analysis Bot!"),
            self.bold("Just send me any coin name or symbol!"),
            self.example_list(),
        )
    }

    fn format_help(&self) -> String {
        format!(
            "{}\n\n\
             {} - welcome message\n\
             {} - price report\n\
             {} - same report\n\
             {} - find coin ids\n\
             {} - this help\n\n\
             Or just send a coin name or symbol.",
            self.bold("Crypto Analysis Bot"),
            self.code("/start"),
            self.code("/price <coin>"),
            self.code("/analyze <coin>"),
            self.code("/search <term>"),
            self.code("/help"),
        )
    }

    /// Usage text for a command sent without its argument, or for a free
    /// text message with nothing usable in it
    fn format_usage(&self, command: Option<&str>) -> String {
        match command {
            Some("search") => format!(
                "💡 {} {}\n\nSearches coin names, symbols and ids.",
                self.bold("Usage:"),
                self.code("/search term"),
            ),
            Some(cmd @ ("analyze" | "analysis")) => format!(
                "🔍 {}\n\nUsage: {}\n\nGet a trading analysis for any cryptocurrency!",
                self.bold("Advanced Analysis"),
                self.code(&format!("/{cmd} coin_name")),
            ),
            Some("price") => format!(
                "💡 {} {}\n\n{}\n• {}\n• {}\n• {}",
                self.bold("Usage:"),
                self.code("/price coin_name"),
                self.bold("Examples:"),
                self.code("/price bitcoin"),
                self.code("/price ETH"),
                self.code("/price solana"),
            ),
            _ => format!(
                "🤖 {}\n\nSend me any coin name or symbol:\n\
                 • Bitcoin, BTC, btc\n\
                 • Ethereum, ETH, eth\n\
                 • Solana, SOL, sol\n\n\
                 💡 {} {}",
                self.bold("Crypto Analysis Bot"),
                self.bold("Examples:"),
                self.example_list(),
            ),
        }
    }

    fn format_not_found(&self, query: &str) -> String {
        format!(
            "❌ Coin not found: {}\n\nPlease check the symbol and try again. Examples: {}",
            self.code(query.trim()),
            self.example_list(),
        )
    }

    fn format_fetch_error(&self) -> String {
        "❌ Error fetching price data. Please try again later.".to_string()
    }

    fn format_search(&self, term: &str, hits: &[(String, String)]) -> String {
        if hits.is_empty() {
            return format!("🔎 No coins match {}", self.code(term.trim()));
        }

        let mut output = format!("🔎 {} {}\n", self.bold("Search results for"), self.code(term.trim()));
        for (key, id) in hits {
            output.push_str(&format!("\n• {} → {}", self.escape(key), self.code(id)));
        }
        output
    }

    fn example_list(&self) -> String {
        EXAMPLE_TICKERS
            .iter()
            .map(|t| self.code(t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Plain text for terminals
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn platform(&self) -> BotPlatform {
        BotPlatform::Cli
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn code(&self, text: &str) -> String {
        text.to_string()
    }

    fn escape(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Telegram legacy Markdown
pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn platform(&self) -> BotPlatform {
        BotPlatform::Telegram
    }

    fn bold(&self, text: &str) -> String {
        format!("*{text}*")
    }

    fn code(&self, text: &str) -> String {
        format!("`{}`", text.replace('`', "'"))
    }

    fn escape(&self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for ch in text.chars() {
            if matches!(ch, '_' | '*' | '`' | '[') {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        escaped
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(platform: BotPlatform) -> Box<dyn Formatter> {
        match platform {
            BotPlatform::Cli => Box::new(PlainFormatter),
            BotPlatform::Telegram => Box::new(MarkdownFormatter),
        }
    }
}

/// Undo [`MarkdownFormatter`] markup: drop `*` and backtick markers and keep
/// escaped characters literally. Used when Telegram rejects a Markdown reply.
pub fn strip_markdown(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => plain.push(chars.next().unwrap_or('\\')),
            '*' | '`' => {}
            other => plain.push(other),
        }
    }
    plain
}

/// Dollar amount with thousands separators, e.g. `$1,234.5678`.
/// Non-finite values render as zero.
pub fn format_usd(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let digits = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    let grouped = group_thousands(int_part);

    match frac_part {
        Some(frac) => format!("{sign}${grouped}.{frac}"),
        None => format!("{sign}${grouped}"),
    }
}

/// Market cap abbreviated with B/M suffixes above one billion/million
pub fn format_market_cap(market_cap: f64) -> String {
    if market_cap > 1e9 {
        format!("${:.2}B", market_cap / 1e9)
    } else if market_cap > 1e6 {
        format!("${:.2}M", market_cap / 1e6)
    } else {
        format_usd(market_cap, 2)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::generate;

    #[test]
    fn test_strip_markdown_recovers_plain_report() {
        let quote = PriceQuote::new("shiba-inu", 1.0, Some(-13.0), 5e7);
        let signal = generate(-13.0, 5e7);
        let markdown = MarkdownFormatter.format_report("shiba-inu", &quote, &signal);
        let plain = PlainFormatter.format_report("shiba-inu", &quote, &signal);

        assert_eq!(strip_markdown(&markdown), plain);
        assert_eq!(strip_markdown("trailing \\"), "trailing \\");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0, 4), "$0.0000");
        assert_eq!(format_usd(43000.0, 4), "$43,000.0000");
        assert_eq!(format_usd(1234567.891, 2), "$1,234,567.89");
        assert_eq!(format_usd(999.999, 2), "$1,000.00");
        assert_eq!(format_usd(-1500.5, 2), "-$1,500.50");
        assert_eq!(format_usd(-0.0001, 2), "$0.00");
        assert_eq!(format_usd(f64::NAN, 2), "$0.00");
    }

    #[test]
    fn test_format_market_cap() {
        assert_eq!(format_market_cap(8.4e11), "$840.00B");
        assert_eq!(format_market_cap(5e7), "$50.00M");
        assert_eq!(format_market_cap(1e9), "$1000.00M");
        assert_eq!(format_market_cap(12_345.0), "$12,345.00");
        assert_eq!(format_market_cap(0.0), "$0.00");
    }

    #[test]
    fn test_support_resistance() {
        let quote = PriceQuote::new("testcoin", 100.0, Some(0.0), 0.0);
        let signal = generate(0.0, 0.0);
        let text = PlainFormatter.format_report("testcoin", &quote, &signal);

        assert!(text.contains("Support: $95.00"));
        assert!(text.contains("Resistance: $105.00"));
        assert!(text.contains("Market Cap: $0.00"));
        assert!(text.contains("24h Change: +0.00%"));
    }

    #[test]
    fn test_zero_quote_renders_everything() {
        let quote = PriceQuote::new("ghost", 0.0, None, 0.0);
        let signal = generate(0.0, 0.0);
        let text = PlainFormatter.format_report("ghost", &quote, &signal);

        assert!(text.contains("Price: $0.0000"));
        assert!(text.contains("Support: $0.00"));
        assert!(text.contains("Risk Level: Low"));
    }

    #[test]
    fn test_end_to_end_numbers() {
        let quote = PriceQuote::new("bitcoin", 43000.0, Some(3.5), 8.4e11);
        let signal = generate(3.5, 8.4e11);
        let text = PlainFormatter.format_report("bitcoin", &quote, &signal);

        assert!(text.contains("BITCOIN Analysis Report"));
        assert!(text.contains("Price: $43,000.0000"));
        assert!(text.contains("24h Change: +3.50%"));
        assert!(text.contains("Market Cap: $840.00B"));
        assert!(text.contains("HOLD"));
        assert!(text.contains("moderate growth"));
        assert!(text.contains("Risk Level: Low"));
        assert!(text.contains("Resistance: $45,150.00"));
        assert!(text.contains("Support: $40,850.00"));
        assert!(text.contains("#bitcoin #Crypto #Trading"));
    }

    #[test]
    fn test_markdown_escapes_dynamic_text() {
        let quote = PriceQuote::new("usd-coin", 1.0, Some(20.0), 5e7);
        let signal = generate(20.0, 5e7);
        let text = MarkdownFormatter.format_report("usd-coin", &quote, &signal);

        assert!(text.contains("*Price:* $1.0000"));
        assert!(text.contains("STRONG\\_BUY (HIGH RISK / LOW CAP)"));
        assert!(text.contains("#usd\\_coin"));
        assert!(text.contains("Support: $0.95"));
    }

    #[test]
    fn test_search_listing() {
        let hits = vec![
            ("BTC".to_string(), "bitcoin".to_string()),
            ("WBTC".to_string(), "wrapped-bitcoin".to_string()),
        ];
        let text = MarkdownFormatter.format_search("btc", &hits);
        assert!(text.contains("• BTC → `bitcoin`"));
        assert!(text.contains("• WBTC → `wrapped-bitcoin`"));

        let empty = PlainFormatter.format_search("zzz", &[]);
        assert_eq!(empty, "🔎 No coins match zzz");
    }

    #[test]
    fn test_usage_per_command() {
        assert!(PlainFormatter.format_usage(Some("price")).contains("/price coin_name"));
        assert!(PlainFormatter.format_usage(Some("analysis")).contains("/analysis coin_name"));
        assert!(PlainFormatter.format_usage(Some("search")).contains("/search term"));
        assert!(PlainFormatter.format_usage(None).contains("Bitcoin, BTC, btc"));
    }

    #[test]
    fn test_not_found_lists_examples() {
        let text = MarkdownFormatter.format_not_found("notacoin");
        assert!(text.contains("`notacoin`"));
        for ticker in EXAMPLE_TICKERS {
            assert!(text.contains(&format!("`{ticker}`")));
        }
    }

    #[test]
    fn test_factory() {
        assert_eq!(FormatterFactory::create(BotPlatform::Cli).platform(), BotPlatform::Cli);
        assert_eq!(
            FormatterFactory::create(BotPlatform::Telegram).platform(),
            BotPlatform::Telegram
        );
    }
}
