//! Regional education offices.

use std::fmt;

/// A metropolitan or provincial office of education.
///
/// NEIS partitions the school directory by office (`ATPT_OFCDC_SC_CODE`),
/// which makes each office an independent shard for bulk loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Seoul,
    Busan,
    Daegu,
    Incheon,
    Gwangju,
    Daejeon,
    Ulsan,
    Sejong,
    Gyeonggi,
    Gangwon,
    Chungbuk,
    Chungnam,
    Jeonbuk,
    Jeonnam,
    Gyeongbuk,
    Gyeongnam,
    Jeju,
    Overseas,
}

impl Region {
    /// Every office, in NEIS code order.
    pub const ALL: [Region; 18] = [
        Region::Seoul,
        Region::Busan,
        Region::Daegu,
        Region::Incheon,
        Region::Gwangju,
        Region::Daejeon,
        Region::Ulsan,
        Region::Sejong,
        Region::Gyeonggi,
        Region::Gangwon,
        Region::Chungbuk,
        Region::Chungnam,
        Region::Jeonbuk,
        Region::Jeonnam,
        Region::Gyeongbuk,
        Region::Gyeongnam,
        Region::Jeju,
        Region::Overseas,
    ];

    /// The office code used in NEIS requests.
    pub fn code(self) -> &'static str {
        match self {
            Region::Seoul => "B10",
            Region::Busan => "C10",
            Region::Daegu => "D10",
            Region::Incheon => "E10",
            Region::Gwangju => "F10",
            Region::Daejeon => "G10",
            Region::Ulsan => "H10",
            Region::Sejong => "I10",
            Region::Gyeonggi => "J10",
            Region::Gangwon => "K10",
            Region::Chungbuk => "M10",
            Region::Chungnam => "N10",
            Region::Jeonbuk => "P10",
            Region::Jeonnam => "Q10",
            Region::Gyeongbuk => "R10",
            Region::Gyeongnam => "S10",
            Region::Jeju => "T10",
            Region::Overseas => "V10",
        }
    }

    /// Short Korean name of the region.
    pub fn name(self) -> &'static str {
        match self {
            Region::Seoul => "서울",
            Region::Busan => "부산",
            Region::Daegu => "대구",
            Region::Incheon => "인천",
            Region::Gwangju => "광주",
            Region::Daejeon => "대전",
            Region::Ulsan => "울산",
            Region::Sejong => "세종",
            Region::Gyeonggi => "경기",
            Region::Gangwon => "강원",
            Region::Chungbuk => "충북",
            Region::Chungnam => "충남",
            Region::Jeonbuk => "전북",
            Region::Jeonnam => "전남",
            Region::Gyeongbuk => "경북",
            Region::Gyeongnam => "경남",
            Region::Jeju => "제주",
            Region::Overseas => "재외",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = Region::ALL.iter().map(|r| r.code()).collect();
        assert_eq!(codes.len(), Region::ALL.len());
    }

    #[test]
    fn display_is_code() {
        assert_eq!(Region::Seoul.to_string(), "B10");
        assert_eq!(Region::Overseas.to_string(), "V10");
    }
}
