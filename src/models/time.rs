use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Formato de hora inválido (HH:MM)")]
pub struct ParseTimeError;

/// A clock time expressed as minutes since midnight, parsed from and
/// rendered as `"HH:MM"`. Valid range is `00:00`–`23:59`; end-of-day
/// arithmetic that may reach 24:00 goes through [`format_minutes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_minutes(minutos: u16) -> Option<Self> {
        (minutos < 24 * 60).then_some(Self(minutos))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    // One- or two-digit hour, exactly two-digit minutes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hora, minuto) = s.split_once(':').ok_or(ParseTimeError)?;
        if hora.is_empty()
            || hora.len() > 2
            || minuto.len() != 2
            || !hora.bytes().all(|b| b.is_ascii_digit())
            || !minuto.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ParseTimeError);
        }
        let h: u16 = hora.parse().map_err(|_| ParseTimeError)?;
        let m: u16 = minuto.parse().map_err(|_| ParseTimeError)?;
        if h > 23 || m > 59 {
            return Err(ParseTimeError);
        }
        Ok(Self(h * 60 + m))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Renders minutes past midnight as zero-padded `"HH:MM"`. Unlike
/// [`TimeOfDay`] the input may reach 1440, so a reservation ending exactly
/// at midnight renders as `"24:00"`.
pub fn format_minutes(total: u32) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsea_horas_validas() {
        assert_eq!("06:00".parse::<TimeOfDay>().unwrap().minutes(), 360);
        assert_eq!("9:30".parse::<TimeOfDay>().unwrap().minutes(), 570);
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap().minutes(), 1439);
    }

    #[test]
    fn rechaza_horas_invalidas() {
        for caso in ["24:00", "12:60", "12", "12:5", "ab:cd", "", "+9:30", "1 :30"] {
            assert!(caso.parse::<TimeOfDay>().is_err(), "aceptó {caso:?}");
        }
    }

    #[test]
    fn renderiza_con_cero_inicial() {
        let t: TimeOfDay = "6:05".parse().unwrap();
        assert_eq!(t.to_string(), "06:05");
    }

    #[test]
    fn formatea_fin_de_dia() {
        assert_eq!(format_minutes(1440), "24:00");
        assert_eq!(format_minutes(720), "12:00");
    }

    #[test]
    fn serde_ida_y_vuelta() {
        let t: TimeOfDay = serde_json::from_str("\"10:30\"").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"10:30\"");
    }
}
