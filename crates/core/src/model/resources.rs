use serde::{Deserialize, Serialize};

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Learning material attached to a (non-academic) roadmap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub notes: Vec<NoteResource>,
    #[serde(default)]
    pub videos: Vec<VideoResource>,
}

impl Resources {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.videos.is_empty()
    }
}

/// A downloadable PDF document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    pub url: String,
}

impl NoteResource {
    /// File name offered when the PDF is saved locally.
    #[must_use]
    pub fn download_file_name(&self) -> String {
        let title = self.title.trim();
        if title.is_empty() {
            "document.pdf".to_owned()
        } else {
            format!("{title}.pdf")
        }
    }
}

/// A YouTube video or playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
}

impl VideoResource {
    /// Embeddable player URL: the explicit `embedUrl` (playlists) or one
    /// derived from the video id.
    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        if let Some(url) = self.embed_url.as_deref().filter(|u| !u.is_empty()) {
            return Some(url.to_owned());
        }
        self.youtube_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("{YOUTUBE_EMBED_BASE}{id}"))
    }

    #[must_use]
    pub fn is_playlist(&self) -> bool {
        self.playlist_id.is_some()
    }

    /// Link to watch outside the embed.
    #[must_use]
    pub fn watch_url(&self) -> Option<String> {
        if let Some(list) = &self.playlist_id {
            return Some(format!("https://www.youtube.com/playlist?list={list}"));
        }
        self.youtube_id
            .as_ref()
            .map(|id| format!("https://www.youtube.com/watch?v={id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(youtube_id: Option<&str>, embed: Option<&str>, playlist: Option<&str>) -> VideoResource {
        VideoResource {
            id: "v1".into(),
            title: "Intro".into(),
            description: String::new(),
            author: "Someone".into(),
            duration: None,
            youtube_id: youtube_id.map(Into::into),
            embed_url: embed.map(Into::into),
            playlist_id: playlist.map(Into::into),
        }
    }

    #[test]
    fn embed_url_prefers_explicit_url() {
        let v = video(Some("abc"), Some("https://www.youtube.com/embed/videoseries?list=PL1"), Some("PL1"));
        assert_eq!(
            v.embed_url().as_deref(),
            Some("https://www.youtube.com/embed/videoseries?list=PL1")
        );
        assert!(v.is_playlist());
    }

    #[test]
    fn embed_url_falls_back_to_video_id() {
        let v = video(Some("abc"), None, None);
        assert_eq!(v.embed_url().as_deref(), Some("https://www.youtube.com/embed/abc"));
        assert_eq!(v.watch_url().as_deref(), Some("https://www.youtube.com/watch?v=abc"));
        assert!(!v.is_playlist());
    }

    #[test]
    fn embed_url_none_without_ids() {
        assert_eq!(video(None, None, None).embed_url(), None);
    }

    #[test]
    fn note_download_name() {
        let note = NoteResource {
            id: None,
            title: "Ownership Cheatsheet".into(),
            description: String::new(),
            author: String::new(),
            url: "https://example.com/a.pdf".into(),
        };
        assert_eq!(note.download_file_name(), "Ownership Cheatsheet.pdf");
    }

    #[test]
    fn resources_deserialize_camel_case() {
        let json = r#"{
            "videos": [{ "id": "v", "title": "T", "youtubeId": "xyz", "playlistId": "PL" }]
        }"#;
        let resources: Resources = serde_json::from_str(json).unwrap();
        assert!(resources.notes.is_empty());
        assert_eq!(resources.videos[0].youtube_id.as_deref(), Some("xyz"));
        assert!(!resources.is_empty());
    }
}
