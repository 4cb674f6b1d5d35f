//! User-agent decomposition into OS / device / browser fields.
//!
//! Rule tables are tried in order; the first match wins. Parsing never fails: text that
//! matches nothing degrades to the `"Other"` / `"Unknown"` tuple.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const OTHER: &str = "Other";
pub const UNKNOWN: &str = "Unknown";

/// Six derived fields of one user-agent string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentInfo {
    pub os_family: String,
    pub os_version: String,
    pub device_family: String,
    pub device_brand: String,
    pub device_model: String,
    pub browser_family: String,
}

impl UserAgentInfo {
    /// Tuple used when nothing in the string is recognised.
    pub fn unknown() -> Self {
        Self {
            os_family: OTHER.to_string(),
            os_version: String::new(),
            device_family: OTHER.to_string(),
            device_brand: UNKNOWN.to_string(),
            device_model: UNKNOWN.to_string(),
            browser_family: OTHER.to_string(),
        }
    }

    pub fn parse(user_agent: &str) -> Self {
        let ua = user_agent.trim();
        if ua.is_empty() {
            return Self::unknown();
        }
        let (os_family, os_version) = parse_os(ua);
        let device = parse_device(ua);
        Self {
            os_family,
            os_version,
            device_family: device.family,
            device_brand: device.brand.unwrap_or_else(|| UNKNOWN.to_string()),
            device_model: device.model.unwrap_or_else(|| UNKNOWN.to_string()),
            browser_family: parse_browser(ua),
        }
    }
}

fn compile<T: Copy>(rules: &[(&'static str, T)]) -> Vec<(Regex, T)> {
    rules
        .iter()
        .filter_map(|(pattern, v)| Regex::new(pattern).ok().map(|r| (r, *v)))
        .collect()
}

// Group 1, when present, is the raw version.
static OS_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(&[
        (r"Windows Phone(?: OS)? (\d+(?:\.\d+)*)", "Windows Phone"),
        (r"Windows NT (\d+\.\d+)", "Windows"),
        (r"Win(?:dows )?(9[58]|ME|CE|XP)", "Windows"),
        (r"(?:iPhone|iPad|iPod).*? OS (\d+(?:_\d+)*)", "iOS"),
        (r"CrOS \S+ (\d+(?:\.\d+)*)", "Chrome OS"),
        (r"Android(?:[ /](\d+(?:\.\d+)*))?", "Android"),
        (r"Mac OS X(?: (\d+(?:[_.]\d+)*))?", "Mac OS X"),
        (r"Ubuntu(?:/(\d+(?:\.\d+)*))?", "Ubuntu"),
        (r"Fedora", "Fedora"),
        (r"FreeBSD", "FreeBSD"),
        (r"Linux", "Linux"),
    ])
});

static BROWSER_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(&[
        (r"(?i)googlebot", "Googlebot"),
        (r"(?i)bingbot", "bingbot"),
        (r"Edg(?:e|A|iOS)?/", "Edge"),
        (r"OPR/|Opera", "Opera"),
        (r"SamsungBrowser/", "Samsung Internet"),
        (r"CriOS/", "Chrome Mobile iOS"),
        (r"FxiOS/", "Firefox iOS"),
        (r"Mobile;.*Firefox/", "Firefox Mobile"),
        (r"Firefox/", "Firefox"),
        (r"Chrome/[\d.]+ Mobile", "Chrome Mobile"),
        (r"Chrome/", "Chrome"),
        (r"MSIE |Trident/.*rv:", "IE"),
        (r"Mobile/\S* Safari/", "Mobile Safari"),
        (r"Android.*Version/[\d.]+", "Android"),
        (r"Version/[\d.]+.*Safari/", "Safari"),
        (r"(?i)^curl/", "curl"),
        (r"(?i)^wget/", "Wget"),
        (r"(?i)python-requests", "Python Requests"),
    ])
});

/// (family, brand, model) for devices recognisable from a fixed token.
static DEVICE_RULES: LazyLock<Vec<(Regex, (&'static str, &'static str, &'static str))>> =
    LazyLock::new(|| {
        compile(&[
            (r"(?i)bot\b|crawler|spider|slurp", ("Spider", "Spider", "Desktop")),
            (r"iPhone", ("iPhone", "Apple", "iPhone")),
            (r"iPad", ("iPad", "Apple", "iPad")),
            (r"iPod", ("iPod", "Apple", "iPod")),
            (r"Macintosh", ("Mac", "Apple", "Mac")),
        ])
    });

// Model token after the Android version, skipping an optional locale like `en-us;`.
static ANDROID_MODEL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"Android[^;)]*;(?:\s*[a-zA-Z]{2}[-_][a-zA-Z]{2};)?\s*([^;)]+?)(?:\s+Build/[^;)]*)?\s*[;)]").ok()
});

static BRAND_PREFIXES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(&[
        (r"^(?i:samsung)|^(?:SM|GT|SCH|SGH)-", "Samsung"),
        (r"^(?:Pixel|Nexus)", "Google"),
        (r"^(?i:moto)", "Motorola"),
        (r"^(?i:huawei)", "Huawei"),
        (r"^LG", "LG"),
        (r"^(?:Redmi|POCO|Mi |MI )", "XiaoMi"),
        (r"^(?i:oneplus)", "OnePlus"),
        (r"^(?i:nokia)", "Nokia"),
        (r"^HTC", "HTC"),
    ])
});

fn parse_os(ua: &str) -> (String, String) {
    for (re, family) in OS_RULES.iter() {
        if let Some(caps) = re.captures(ua) {
            let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let version = match *family {
                "Windows" => windows_version(raw),
                _ => raw.replace('_', "."),
            };
            return (family.to_string(), version);
        }
    }
    (OTHER.to_string(), String::new())
}

/// NT kernel versions to marketing names.
fn windows_version(nt: &str) -> String {
    match nt {
        "10.0" => "10",
        "6.3" => "8.1",
        "6.2" => "8",
        "6.1" => "7",
        "6.0" => "Vista",
        "5.1" | "5.2" => "XP",
        "5.0" => "2000",
        other => other,
    }
    .to_string()
}

struct Device {
    family: String,
    brand: Option<String>,
    model: Option<String>,
}

fn parse_device(ua: &str) -> Device {
    for (re, (family, brand, model)) in DEVICE_RULES.iter() {
        if re.is_match(ua) {
            return Device {
                family: family.to_string(),
                brand: Some(brand.to_string()),
                model: Some(model.to_string()),
            };
        }
    }

    let android_model = ANDROID_MODEL
        .as_ref()
        .and_then(|re| re.captures(ua))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|m| !m.is_empty() && !m.starts_with("Mobile") && !m.starts_with("rv:"));

    if let Some(token) = android_model {
        let brand = BRAND_PREFIXES
            .iter()
            .find(|(re, _)| re.is_match(token))
            .map(|(_, b)| b.to_string());
        let model = strip_brand(token, brand.as_deref());
        let family = match &brand {
            Some(b) => format!("{b} {model}"),
            None => model.clone(),
        };
        return Device {
            family,
            brand,
            model: Some(model),
        };
    }

    Device {
        family: OTHER.to_string(),
        brand: None,
        model: None,
    }
}

fn strip_brand(token: &str, brand: Option<&str>) -> String {
    let Some(brand) = brand else {
        return token.to_string();
    };
    let lower = token.to_ascii_lowercase();
    let prefix = brand.to_ascii_lowercase();
    if lower.starts_with(&prefix) && token.len() > prefix.len() {
        let rest = token[prefix.len()..].trim_start_matches([' ', '-', '_']);
        if !rest.is_empty() {
            return rest.to_string();
        }
    }
    token.to_string()
}

fn parse_browser(ua: &str) -> String {
    BROWSER_RULES
        .iter()
        .find(|(re, _)| re.is_match(ua))
        .map(|(_, family)| family.to_string())
        .unwrap_or_else(|| OTHER.to_string())
}
