use serde::{Deserialize, Serialize};

/// Page copy and product list rendered by the landing page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteContent {
    pub header: HeaderContent,
    pub og: OpenGraph,
    pub products: Vec<Product>,
    pub footer: FooterContent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeaderContent {
    pub subtitle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: OpenGraphType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OpenGraphType {
    #[serde(rename = "website")]
    Website,
    #[serde(rename = "article")]
    Article,
    #[serde(rename = "book")]
    Book,
    #[serde(rename = "profile")]
    Profile,
    #[serde(rename = "music.song")]
    MusicSong,
    #[serde(rename = "music.album")]
    MusicAlbum,
    #[serde(rename = "music.playlist")]
    MusicPlaylist,
    #[serde(rename = "music.radio_station")]
    MusicRadioStation,
    #[serde(rename = "video.movie")]
    VideoMovie,
    #[serde(rename = "video.episode")]
    VideoEpisode,
    #[serde(rename = "video.tv_show")]
    VideoTvShow,
    #[serde(rename = "video.other")]
    VideoOther,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub name: String,
    pub domain: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// Explicit link, or the product's domain over https
    pub fn href(&self) -> String {
        self.link
            .clone()
            .unwrap_or_else(|| format!("https://{}", self.domain))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FooterContent {
    #[serde(default)]
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FooterLink {
    pub text: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: FooterLinkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FooterLinkType {
    Link,
    Twitter,
    Coffee,
    Kimi,
    Dify,
    License,
}
