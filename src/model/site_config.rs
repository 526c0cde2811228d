use serde::{Deserialize, Serialize};

/// Site text and branding shown on the public page (persisted under `fc_config`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_name: String,
    pub slogan: String,
    pub hero_description: String,
    pub telegram_link: String,
    pub kakao_link: String,
    pub primary_color: String,
    pub secondary_color: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "FANTASTIC CLARK".into(),
            slogan: "전 세계 프리미엄 카지노의 정점, 당신의 품격에 맞는 최고의 파트너".into(),
            hero_description: "FANTASTIC CLARK은 필리핀 및 해외 주요 거점 최고의 VIP 전용 에이전시입니다. 안전하고 차별화된 맞춤형 서비스를 제공합니다.".into(),
            telegram_link: "https://t.me/fantastic_clark".into(),
            kakao_link: "https://kakao.com/fantastic_clark".into(),
            primary_color: "#8A2BE2".into(),
            secondary_color: "#A020F0".into(),
        }
    }
}

/// One editable field of [`SiteConfig`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    SiteName,
    Slogan,
    HeroDescription,
    TelegramLink,
    KakaoLink,
    PrimaryColor,
    SecondaryColor,
}

impl ConfigField {
    pub const ALL: [ConfigField; 7] = [
        ConfigField::SiteName,
        ConfigField::Slogan,
        ConfigField::HeroDescription,
        ConfigField::TelegramLink,
        ConfigField::KakaoLink,
        ConfigField::PrimaryColor,
        ConfigField::SecondaryColor,
    ];

    /// Persisted (camelCase) key for the field
    pub fn key(self) -> &'static str {
        match self {
            ConfigField::SiteName => "siteName",
            ConfigField::Slogan => "slogan",
            ConfigField::HeroDescription => "heroDescription",
            ConfigField::TelegramLink => "telegramLink",
            ConfigField::KakaoLink => "kakaoLink",
            ConfigField::PrimaryColor => "primaryColor",
            ConfigField::SecondaryColor => "secondaryColor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfigField::SiteName => "Site name",
            ConfigField::Slogan => "Slogan",
            ConfigField::HeroDescription => "Hero description",
            ConfigField::TelegramLink => "Telegram link",
            ConfigField::KakaoLink => "KakaoTalk link",
            ConfigField::PrimaryColor => "Primary color",
            ConfigField::SecondaryColor => "Secondary color",
        }
    }

    /// Accepts the persisted key, the snake_case name, or a dashed variant.
    pub fn parse_field(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(|c| c.to_lowercase())
            .collect();
        ConfigField::ALL
            .into_iter()
            .find(|f| f.key().to_lowercase() == normalized)
    }
}

impl SiteConfig {
    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::SiteName => &self.site_name,
            ConfigField::Slogan => &self.slogan,
            ConfigField::HeroDescription => &self.hero_description,
            ConfigField::TelegramLink => &self.telegram_link,
            ConfigField::KakaoLink => &self.kakao_link,
            ConfigField::PrimaryColor => &self.primary_color,
            ConfigField::SecondaryColor => &self.secondary_color,
        }
    }

    pub fn set(&mut self, field: ConfigField, value: String) {
        let slot = match field {
            ConfigField::SiteName => &mut self.site_name,
            ConfigField::Slogan => &mut self.slogan,
            ConfigField::HeroDescription => &mut self.hero_description,
            ConfigField::TelegramLink => &mut self.telegram_link,
            ConfigField::KakaoLink => &mut self.kakao_link,
            ConfigField::PrimaryColor => &mut self.primary_color,
            ConfigField::SecondaryColor => &mut self.secondary_color,
        };
        *slot = value;
    }
}
