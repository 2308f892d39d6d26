use std::collections::HashMap;

use serde::Deserialize;

/// Wrapper for `Items`-keyed list responses.
#[derive(Debug, Deserialize)]
pub struct ItemsPage<T> {
    #[serde(rename = "Items", default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(rename = "TotalRecordCount", default)]
    pub total_record_count: i64,
}

/// One library from `GET /Library/MediaFolders`.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaFolder {
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

/// One media item from `GET /Users/{userId}/Items`.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "ImageTags", default)]
    pub image_tags: HashMap<String, String>,
    #[serde(rename = "DateCreated", default)]
    pub date_created: Option<String>,
    #[serde(rename = "DateLastMediaAdded", default)]
    pub date_last_media_added: Option<String>,
}

impl MediaItem {
    /// Whether the item carries a primary cover image.
    pub fn has_primary_image(&self) -> bool {
        self.image_tags.contains_key("Primary")
    }
}
