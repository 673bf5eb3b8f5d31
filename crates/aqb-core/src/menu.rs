//! Chat actions, commands and the declarative screens they produce.

/// Button actions. The callback data strings are part of the chat protocol:
/// buttons sent by older bot versions must keep working.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    CheckAqi,
    AboutAqi,
    DetailedAqi,
    SgDetails,
    BackToMenu,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::CheckAqi,
        Action::AboutAqi,
        Action::DetailedAqi,
        Action::SgDetails,
        Action::BackToMenu,
    ];

    pub fn callback_data(self) -> &'static str {
        match self {
            Action::CheckAqi => "check_aqi",
            Action::AboutAqi => "about_aqi",
            Action::DetailedAqi => "detailed_aqi",
            Action::SgDetails => "sg_details",
            Action::BackToMenu => "back_to_menu",
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.callback_data() == data.trim())
    }

    /// Placeholder shown while an action fetches upstream data.
    pub fn loading_text(self) -> Option<&'static str> {
        match self {
            Action::CheckAqi => Some("🔄 Fetching regional air quality data..."),
            Action::DetailedAqi => Some("🔄 Fetching detailed air quality data..."),
            Action::SgDetails => Some("🔄 Fetching detailed Singapore PSI data..."),
            Action::AboutAqi | Action::BackToMenu => None,
        }
    }
}

/// Slash commands understood by the bot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    /// `/aqi` and `/air`.
    Air,
    Help,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Command::Start),
            "aqi" | "air" => Some(Command::Air),
            "help" => Some(Command::Help),
            _ => None,
        }
    }

    /// The button action that renders the same screen, if any.
    pub fn action(self) -> Option<Action> {
        match self {
            Command::Start => Some(Action::BackToMenu),
            Command::Air => Some(Action::CheckAqi),
            Command::Help => None,
        }
    }
}

/// Split `/cmd@botname args` into a lowercase command name and the rest.
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }

    let mut parts = text.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    Some((cmd, rest))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuButton {
    pub label: &'static str,
    pub action: Action,
}

const fn button(label: &'static str, action: Action) -> MenuButton {
    MenuButton { label, action }
}

/// Render-ready text (Telegram HTML) plus the next available actions, one
/// button per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub buttons: Vec<MenuButton>,
}

impl Screen {
    pub fn new(text: impl Into<String>, buttons: &[MenuButton]) -> Self {
        Self {
            text: text.into(),
            buttons: buttons.to_vec(),
        }
    }
}

pub const MAIN_MENU_BUTTONS: [MenuButton; 2] = [
    button("🌍 Check Air Quality", Action::CheckAqi),
    button("ℹ️ About AQI & PSI", Action::AboutAqi),
];

pub const REPORT_BUTTONS: [MenuButton; 3] = [
    button("🔄 Refresh", Action::CheckAqi),
    button("📊 Detailed Jakarta", Action::DetailedAqi),
    button("🇸🇬 Singapore Details", Action::SgDetails),
];

pub const ABOUT_BUTTONS: [MenuButton; 2] = [
    button("🔙 Back to Menu", Action::BackToMenu),
    button("🌍 Check Air Quality", Action::CheckAqi),
];

pub const STATION_DETAIL_BUTTONS: [MenuButton; 2] = [
    button("🔄 Refresh", Action::DetailedAqi),
    button("🔙 Back", Action::CheckAqi),
];

pub const REGIONAL_DETAIL_BUTTONS: [MenuButton; 2] = [
    button("🔄 Refresh", Action::SgDetails),
    button("🔙 Back", Action::CheckAqi),
];

pub const WELCOME_TEXT: &str = "🌟 <b>Welcome to Regional Air Quality Bot!</b>

This bot provides real-time air quality information for Jakarta (AQI) and Singapore (PSI) using official data sources.

<b>Available Commands:</b>
• /aqi - Get current air quality comparison
• /help - Show the help message

<b>Features:</b>
✅ Real-time Jakarta AQI data
✅ Real-time Singapore PSI data
✅ Regional comparison
✅ Health recommendations
✅ Pollutant breakdown

Click the button below to check current air quality!";

pub const HELP_TEXT: &str = "🆘 <b>Regional Air Quality Bot Help</b>

<b>Commands:</b>
• <code>/start</code> - Welcome message and main menu
• <code>/aqi</code> or <code>/air</code> - Get current air quality comparison
• <code>/help</code> - Show this help message

<b>Understanding AQI vs PSI:</b>

🇮🇩 <b>AQI (Air Quality Index) - Jakarta:</b>
• 0-50: Good 🟢
• 51-100: Moderate 🟡
• 101-150: Unhealthy for Sensitive Groups 🟠
• 151-200: Unhealthy 🔴
• 201-300: Very Unhealthy 🟣
• 301+: Hazardous ⚫

🇸🇬 <b>PSI (Pollutant Standards Index) - Singapore:</b>
• 0-50: Good 🟢
• 51-100: Moderate 🟡
• 101-200: Unhealthy 🟠
• 201-300: Very Unhealthy 🔴
• 301+: Hazardous ⚫

<b>Pollutants Monitored:</b>
• PM2.5 &amp; PM10: Particulate matter
• NO2: Nitrogen dioxide
• O3: Ozone
• CO: Carbon monoxide
• SO2: Sulfur dioxide

<b>Data Sources:</b>
• Jakarta: AQICN.org
• Singapore: Data.gov.sg";

pub const ABOUT_TEXT: &str = "📊 <b>About Air Quality Indices</b>

<b>AQI vs PSI - What's the difference?</b>

Both indices measure air quality but use different scales:

🇮🇩 <b>AQI (Air Quality Index):</b>
Used by Jakarta and most countries worldwide
• More granular scale (6 categories)
• Includes \"Unhealthy for Sensitive Groups\"
• Range: 0-500+

🇸🇬 <b>PSI (Pollutant Standards Index):</b>
Used by Singapore and some Asian countries
• Simpler scale (5 categories)
• More conservative thresholds
• Range: 0-500+

<b>Health Impact Scale:</b>
🟢 <b>Good (0-50):</b> Minimal impact
🟡 <b>Moderate (51-100):</b> Acceptable
🟠 <b>Unhealthy (101-150/200):</b> Sensitive groups affected
🔴 <b>Very Unhealthy (151-200/201-300):</b> Everyone affected
⚫ <b>Hazardous (301+):</b> Emergency conditions

<b>Main Pollutants:</b>
• PM2.5: Fine particles (most dangerous)
• PM10: Coarse particles
• Ozone (O3): Ground-level ozone
• NO2: Traffic pollution
• SO2: Industrial pollution

Both systems update hourly from official monitoring stations.";

pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Use /help to see what I can do.";
