use time::{macros::format_description, OffsetDateTime};

/// 現在日時を提供する。
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// システム時刻を返す`Clock`
///
/// ローカルのオフセットを得られない場合はUTCを返す。
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

impl<F> Clock for F
where
    F: Fn() -> OffsetDateTime + Send + Sync,
{
    fn now(&self) -> OffsetDateTime {
        self()
    }
}

/// 日時をタイムスタンプ文字列に変換する。
///
/// # 引数
///
/// - datetime: 変換する日時。
///
/// # 戻り値
///
/// `YYYY-MM-DD HH:MM:SS`形式の文字列。
pub fn timestamp(datetime: &OffsetDateTime) -> String {
    // 固定の書式に含まれる要素はすべて`OffsetDateTime`が持つため、失敗しない
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    datetime.format(format).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_timestamp() {
        let date = datetime!(2024-01-15 10:30:00 +09:00);
        assert_eq!("2024-01-15 10:30:00", timestamp(&date));
    }

    #[test]
    fn test_timestamp_pads_fields() {
        let date = datetime!(2022-05-06 03:04:05 UTC);
        assert_eq!("2022-05-06 03:04:05", timestamp(&date));
    }

    #[test]
    fn test_system_clock_shape() {
        let re = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap();
        assert!(re.is_match(&timestamp(&SystemClock.now())));
    }

    #[test]
    fn test_closure_clock() {
        let clock = || datetime!(2000-01-01 00:00:00 UTC);
        assert_eq!("2000-01-01 00:00:00", timestamp(&clock.now()));
    }
}
