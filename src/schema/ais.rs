//! Default Application Identifier table.
//!
//! One row per AI: code, FNC1 class, component spec and constraint
//! attributes, following the GS1 General Specifications AI index. The
//! component spec grammar is the dictionary's compact form (`N14,csum,key`,
//! `X..20`, `[N4,hhmm]`); attributes are the space-separated
//! `dlpkey`/`ex=`/`req=`/`nodlattr` tokens.

/// Value is FNC1-terminated (variable length).
const FNC1: bool = true;
/// Predefined-length value; no FNC1 separator follows it.
const FIXED: bool = false;

/// GenSpecs predefined-length AI prefixes (figure 7.8.4-2). Unknown AIs
/// under these prefixes are vivified without an FNC1 requirement.
pub(crate) static FIXED_VALUE_PREFIX: [bool; 100] = fixed_value_prefixes();

const fn fixed_value_prefixes() -> [bool; 100] {
    let list = [
        0, 1, 2, 3, 4, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 31, 32, 33, 34, 35, 36, 41,
    ];
    let mut table = [false; 100];
    let mut i = 0;
    while i < list.len() {
        table[list[i]] = true;
        i += 1;
    }
    table
}

/// `(code, fnc1, component spec, attributes)`
pub(crate) static DEFAULT_AIS: &[(&str, bool, &str, &str)] = &[
    ("00", FIXED, "N18,csum,keyoff1", "dlpkey"),
    ("01", FIXED, "N14,csum,key", "ex=02,37,8006,8026 dlpkey=22,10,21|235"),
    ("02", FIXED, "N14,csum,key", "ex=01,8006 req=37"),
    ("10", FNC1, "X..20", "req=01,02,8006,8026"),
    ("11", FIXED, "N6,yymmd0", "req=01,02,8006,8026"),
    ("12", FIXED, "N6,yymmd0", "req=8020"),
    ("13", FIXED, "N6,yymmd0", "req=01,02,8006,8026"),
    ("15", FIXED, "N6,yymmd0", "req=01,02,8006,8026"),
    ("16", FIXED, "N6,yymmd0", "req=01,02,8006,8026"),
    ("17", FIXED, "N6,yymmd0", "req=01,02,255,8003,8006,8026"),
    ("20", FIXED, "N2", "req=01,02,8006,8026"),
    ("21", FNC1, "X..20", "req=01,03,8006 ex=235"),
    ("22", FNC1, "X..20", "req=01"),
    ("235", FNC1, "X..28", "req=01 ex=21"),
    ("240", FNC1, "X..30", "req=01,02,8006,8026"),
    ("241", FNC1, "X..30", "req=01,02,8006,8026"),
    ("242", FNC1, "N..6", "req=01,02,8006,8026"),
    ("243", FNC1, "X..20", "req=01"),
    ("250", FNC1, "X..30", "req=01,8006 req=21"),
    ("251", FNC1, "X..30", "req=01,8006"),
    ("253", FNC1, "N13,csum,key [X..17]", "dlpkey"),
    ("254", FNC1, "X..20", "req=414"),
    ("255", FNC1, "N13,csum,key [N..12]", "dlpkey"),
    ("30", FNC1, "N..8", "req=01,02"),
    ("3100", FIXED, "N6", "req=01,02"),
    ("3101", FIXED, "N6", "req=01,02"),
    ("3102", FIXED, "N6", "req=01,02"),
    ("3103", FIXED, "N6", "req=01,02"),
    ("3104", FIXED, "N6", "req=01,02"),
    ("3105", FIXED, "N6", "req=01,02"),
    ("3200", FIXED, "N6", "req=01,02"),
    ("3201", FIXED, "N6", "req=01,02"),
    ("3202", FIXED, "N6", "req=01,02"),
    ("3203", FIXED, "N6", "req=01,02"),
    ("3204", FIXED, "N6", "req=01,02"),
    ("3205", FIXED, "N6", "req=01,02"),
    ("3300", FIXED, "N6", "req=00,01"),
    ("3301", FIXED, "N6", "req=00,01"),
    ("3302", FIXED, "N6", "req=00,01"),
    ("3303", FIXED, "N6", "req=00,01"),
    ("3304", FIXED, "N6", "req=00,01"),
    ("3305", FIXED, "N6", "req=00,01"),
    ("3400", FIXED, "N6", "req=00,01"),
    ("3401", FIXED, "N6", "req=00,01"),
    ("3402", FIXED, "N6", "req=00,01"),
    ("3403", FIXED, "N6", "req=00,01"),
    ("3404", FIXED, "N6", "req=00,01"),
    ("3405", FIXED, "N6", "req=00,01"),
    ("37", FNC1, "N..8", "req=00,02,8026"),
    ("3900", FNC1, "N..15", "req=8020 ex=391"),
    ("3901", FNC1, "N..15", "req=8020 ex=391"),
    ("3902", FNC1, "N..15", "req=8020 ex=391"),
    ("3903", FNC1, "N..15", "req=8020 ex=391"),
    ("3904", FNC1, "N..15", "req=8020 ex=391"),
    ("3905", FNC1, "N..15", "req=8020 ex=391"),
    ("3910", FNC1, "N3,iso4217 N..15", "req=8020 ex=390"),
    ("3911", FNC1, "N3,iso4217 N..15", "req=8020 ex=390"),
    ("3912", FNC1, "N3,iso4217 N..15", "req=8020 ex=390"),
    ("3913", FNC1, "N3,iso4217 N..15", "req=8020 ex=390"),
    ("3914", FNC1, "N3,iso4217 N..15", "req=8020 ex=390"),
    ("3915", FNC1, "N3,iso4217 N..15", "req=8020 ex=390"),
    ("3920", FNC1, "N..15", "req=01 ex=393"),
    ("3921", FNC1, "N..15", "req=01 ex=393"),
    ("3922", FNC1, "N..15", "req=01 ex=393"),
    ("3923", FNC1, "N..15", "req=01 ex=393"),
    ("3924", FNC1, "N..15", "req=01 ex=393"),
    ("3925", FNC1, "N..15", "req=01 ex=393"),
    ("3930", FNC1, "N3,iso4217 N..15", "req=01 ex=392"),
    ("3931", FNC1, "N3,iso4217 N..15", "req=01 ex=392"),
    ("3932", FNC1, "N3,iso4217 N..15", "req=01 ex=392"),
    ("3933", FNC1, "N3,iso4217 N..15", "req=01 ex=392"),
    ("3934", FNC1, "N3,iso4217 N..15", "req=01 ex=392"),
    ("3935", FNC1, "N3,iso4217 N..15", "req=01 ex=392"),
    ("400", FNC1, "X..30", ""),
    ("401", FNC1, "X..30,key", "dlpkey"),
    ("402", FNC1, "N17,csum,key", "dlpkey"),
    ("403", FNC1, "X..30", "req=00"),
    ("410", FIXED, "N13,csum,key", ""),
    ("411", FIXED, "N13,csum,key", ""),
    ("412", FIXED, "N13,csum,key", ""),
    ("413", FIXED, "N13,csum,key", ""),
    ("414", FIXED, "N13,csum,key", "dlpkey=254|7040"),
    ("415", FIXED, "N13,csum,key", "dlpkey=8020"),
    ("416", FIXED, "N13,csum,key", ""),
    ("417", FIXED, "N13,csum,key", "dlpkey=7040"),
    ("420", FNC1, "X..20", "ex=421"),
    ("421", FNC1, "N3,iso3166 X..9", "ex=420"),
    ("422", FNC1, "N3,iso3166", "req=01,02,8006,8026 ex=426"),
    ("423", FNC1, "N3..15,iso3166list", "req=01,02"),
    ("424", FNC1, "N3,iso3166", "req=01,02,8006,8026 ex=426"),
    ("425", FNC1, "N3..15,iso3166list", "req=01,02,8006,8026 ex=426"),
    ("426", FNC1, "N3,iso3166", "req=01,02,8006,8026"),
    ("427", FNC1, "X..3", "req=422"),
    ("4300", FNC1, "X..35,pcenc", "req=00"),
    ("4301", FNC1, "X..35,pcenc", "req=00"),
    ("4302", FNC1, "X..70,pcenc", "req=00"),
    ("4308", FNC1, "X..30", "req=00"),
    ("7001", FNC1, "N13", "req=01,02"),
    ("7002", FNC1, "X..30", "req=01,02"),
    ("7003", FNC1, "N10,yymmddhhmm", "req=01,02"),
    ("7004", FNC1, "N..4", "req=01,10"),
    ("7005", FNC1, "X..12", "req=01,02"),
    ("7006", FNC1, "N6,yymmdd", "req=01,02"),
    ("7007", FNC1, "N6..12,yymmdd", "req=01,02"),
    ("7008", FNC1, "X..3", "req=01,02"),
    ("7009", FNC1, "X..10", "req=01,02"),
    ("7010", FNC1, "X..2", "req=01,02"),
    ("7011", FNC1, "N6,yymmdd [N4,hhmm]", "req=01,02"),
    ("7020", FNC1, "X..20", "req=01,8006"),
    ("7021", FNC1, "X..20", "req=01,8006"),
    ("7022", FNC1, "X..20", "req=7021"),
    ("7023", FNC1, "X..30", "req=8018"),
    ("7040", FNC1, "N1 X1 X1 X1", ""),
    ("710", FNC1, "X..20", "req=01,02"),
    ("711", FNC1, "X..20", "req=01,02"),
    ("712", FNC1, "X..20", "req=01,02"),
    ("713", FNC1, "X..20", "req=01,02"),
    ("714", FNC1, "X..20", "req=01,02"),
    ("715", FNC1, "X..20", "req=01,02"),
    ("7240", FNC1, "X..20", "req=01,8006"),
    ("8001", FNC1, "N4,nonzero N5,nonzero N3,nonzero N1,winding N1", "req=01"),
    ("8002", FNC1, "X..20", ""),
    ("8003", FNC1, "N1,zero N13,csum,key [X..16]", "dlpkey=7040"),
    ("8004", FNC1, "X..30,key", "dlpkey=7040"),
    ("8005", FNC1, "N6", "req=01,02"),
    ("8006", FNC1, "N14,csum N4,pieceoftotal", "ex=01,37 dlpkey=22,10,21"),
    ("8007", FNC1, "X..34,iban", ""),
    ("8008", FNC1, "N8,yymmddhh [N..4]", "req=01,02"),
    ("8009", FNC1, "X..50", ""),
    ("8010", FNC1, "Y..30,key", "dlpkey=8011"),
    ("8011", FNC1, "N..12,nozeroprefix", "req=8010"),
    ("8012", FNC1, "X..20", "req=01,8006"),
    ("8013", FNC1, "X..25,csumalpha,key", "dlpkey"),
    ("8017", FNC1, "N18,csum,key", "dlpkey=8019 ex=8018"),
    ("8018", FNC1, "N18,csum,key", "dlpkey=8019 ex=8017"),
    ("8019", FNC1, "N..10", "req=8017,8018"),
    ("8020", FNC1, "X..25", "req=415"),
    ("8026", FNC1, "N14,csum N4,pieceoftotal", "req=02+37 ex=01,8006"),
    ("8030", FNC1, "Z..90", "nodlattr"),
    ("8110", FNC1, "X..70", ""),
    ("8111", FNC1, "N4", "req=255"),
    ("8112", FNC1, "X..70", ""),
    ("8200", FNC1, "X..70", "req=01 nodlattr"),
    ("90", FNC1, "X..30", ""),
    ("91", FNC1, "X..90", ""),
    ("92", FNC1, "X..90", ""),
    ("93", FNC1, "X..90", ""),
    ("94", FNC1, "X..90", ""),
    ("95", FNC1, "X..90", ""),
    ("96", FNC1, "X..90", ""),
    ("97", FNC1, "X..90", ""),
    ("98", FNC1, "X..90", ""),
    ("99", FNC1, "X..90", ""),
];
