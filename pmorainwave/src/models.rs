//! Data models for Rainwave songs and elections
//!
//! Field names follow the Rainwave API (`fave`, `rating_user`,
//! `elec_request_user_id`, ...). The API sends `null` for anything the
//! listener never set, so those fields fall back to their default value.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes `null` as `T::default()`
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Songs
// ============================================================================

/// An album a song belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Rainwave album id
    #[serde(default)]
    pub id: u32,
    /// Album name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Whether the listener marked this album as a favorite
    #[serde(rename = "fave", default, deserialize_with = "null_as_default")]
    pub favorite: bool,
}

impl Album {
    /// Create a new album
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            favorite: false,
        }
    }

    /// Mark the album as a favorite (or not)
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }
}

/// A candidate song of an election
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Rainwave song id
    pub id: u32,
    /// Song title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Whether the listener marked this song as a favorite
    #[serde(rename = "fave", default, deserialize_with = "null_as_default")]
    pub favorite: bool,
    /// Community rating
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    /// The listener's own rating, `0.0` when unset
    #[serde(rename = "rating_user", default, deserialize_with = "null_as_default")]
    pub user_rating: f64,
    /// Id of the user who requested the song, `0` when nobody did
    #[serde(
        rename = "elec_request_user_id",
        default,
        deserialize_with = "null_as_default"
    )]
    pub requested_by_user_id: u32,
    /// Albums the song appears on, the first one being the main album
    #[serde(default, deserialize_with = "null_as_default")]
    pub albums: Vec<Album>,
}

impl Song {
    /// Create a new song with no rating, request or album
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the community rating
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the listener's rating
    pub fn with_user_rating(mut self, rating: f64) -> Self {
        self.user_rating = rating;
        self
    }

    /// Mark the song as a favorite (or not)
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    /// Set the requester
    pub fn requested_by(mut self, user_id: u32) -> Self {
        self.requested_by_user_id = user_id;
        self
    }

    /// Append an album
    pub fn with_album(mut self, album: Album) -> Self {
        self.albums.push(album);
        self
    }

    /// The listener's rating when set, the community rating otherwise
    pub fn effective_rating(&self) -> f64 {
        if self.user_rating > 0.0 {
            self.user_rating
        } else {
            self.rating
        }
    }

    /// Check if somebody requested this song
    pub fn is_requested(&self) -> bool {
        self.requested_by_user_id != 0
    }

    /// Check if `user_id` requested this song
    ///
    /// Always `false` for user id `0`, which means "nobody".
    pub fn is_requested_by(&self, user_id: u32) -> bool {
        self.is_requested() && self.requested_by_user_id == user_id
    }

    /// The main album, if any
    pub fn first_album(&self) -> Option<&Album> {
        self.albums.first()
    }

    /// Check if the main album is a favorite; `false` when the song has no album
    pub fn is_first_album_favorite(&self) -> bool {
        self.first_album().is_some_and(|album| album.favorite)
    }
}

// ============================================================================
// Elections
// ============================================================================

/// A voting event: the slate of songs listeners can vote for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Election {
    /// Rainwave event id
    pub id: u32,
    /// Candidate songs, in the order the station lists them
    #[serde(default, deserialize_with = "null_as_default")]
    pub songs: Vec<Song>,
}

impl Election {
    /// Create a new election
    pub fn new(id: u32, songs: Vec<Song>) -> Self {
        Self { id, songs }
    }

    /// Number of candidate songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the slate is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
