//! Code tables shared by request bodies and records.

use super::Partition;

/// Status codes of a game in the games tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    ToBeReleased = 1,
    NotStarted = 2,
    Playing = 3,
    Finished = 4,
    Dropped = 5,
}

impl GameStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(GameStatus::ToBeReleased),
            2 => Some(GameStatus::NotStarted),
            3 => Some(GameStatus::Playing),
            4 => Some(GameStatus::Finished),
            5 => Some(GameStatus::Dropped),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::ToBeReleased => "To be released",
            GameStatus::NotStarted => "Not started",
            GameStatus::Playing => "Playing",
            GameStatus::Finished => "Finished",
            GameStatus::Dropped => "Dropped",
        }
    }

    /// Collection holding games with this status.
    pub fn partition(&self) -> Partition {
        match self {
            GameStatus::ToBeReleased => Partition::ToBeReleased,
            GameStatus::NotStarted => Partition::NotStarted,
            GameStatus::Playing => Partition::InProgress,
            GameStatus::Finished => Partition::Finished,
            GameStatus::Dropped => Partition::Dropped,
        }
    }
}

/// Status codes of a media in the medias tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaStatus {
    NotStarted = 1,
    ToBeReleased = 2,
    WatchingReading = 3,
    Finished = 4,
    Dropped = 5,
}

impl MediaStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(MediaStatus::NotStarted),
            2 => Some(MediaStatus::ToBeReleased),
            3 => Some(MediaStatus::WatchingReading),
            4 => Some(MediaStatus::Finished),
            5 => Some(MediaStatus::Dropped),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaStatus::NotStarted => "Not started",
            MediaStatus::ToBeReleased => "To be released",
            MediaStatus::WatchingReading => "Watching/Reading",
            MediaStatus::Finished => "Finished",
            MediaStatus::Dropped => "Dropped",
        }
    }

    pub fn partition(&self) -> Partition {
        match self {
            MediaStatus::NotStarted => Partition::NotStarted,
            MediaStatus::ToBeReleased => Partition::ToBeReleased,
            MediaStatus::WatchingReading => Partition::InProgress,
            MediaStatus::Finished => Partition::Finished,
            MediaStatus::Dropped => Partition::Dropped,
        }
    }
}

/// Priority codes, shared by both trackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Priority {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Priority::High),
            2 => Some(Priority::Medium),
            3 => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Kinds of media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Series = 1,
    Movie = 2,
    Book = 3,
    ComicBook = 4,
}

impl MediaType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(MediaType::Series),
            2 => Some(MediaType::Movie),
            3 => Some(MediaType::Book),
            4 => Some(MediaType::ComicBook),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Series => "Series",
            MediaType::Movie => "Movie",
            MediaType::Book => "Book",
            MediaType::ComicBook => "Comic book",
        }
    }
}

/// Parse a numeric code sent as a string (media records store codes as text).
pub fn parse_code(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_status_round_trip_codes() {
        for code in 1..=5 {
            let status = GameStatus::from_code(code).unwrap();
            assert_eq!(status.code() as i64, code);
        }
        assert_eq!(GameStatus::from_code(0), None);
        assert_eq!(GameStatus::Playing.partition(), Partition::InProgress);
    }

    #[test]
    fn test_media_codes_differ_from_games() {
        assert_eq!(MediaStatus::from_code(1), Some(MediaStatus::NotStarted));
        assert_eq!(GameStatus::from_code(1), Some(GameStatus::ToBeReleased));
        assert_eq!(
            MediaStatus::WatchingReading.partition(),
            Partition::InProgress
        );
    }

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code(" 3 "), Some(3));
        assert_eq!(parse_code("High"), None);
        assert_eq!(Priority::from_code(3), Some(Priority::Low));
        assert_eq!(MediaType::from_code(4).unwrap().label(), "Comic book");
    }
}
