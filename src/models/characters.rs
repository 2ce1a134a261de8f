use std::collections::HashMap;
use lazy_static::lazy_static;

lazy_static! {
    // 角色ID → 显示名称
    static ref CHARACTER_NAMES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("00", "Group Voices");
        map.insert("01", "Ushiromiya Kinzo");
        map.insert("02", "Ushiromiya Krauss");
        map.insert("03", "Ushiromiya Natsuhi");
        map.insert("04", "Ushiromiya Jessica");
        map.insert("05", "Ushiromiya Eva");
        map.insert("06", "Ushiromiya Hideyoshi");
        map.insert("07", "Ushiromiya George");
        map.insert("08", "Ushiromiya Rudolf");
        map.insert("09", "Ushiromiya Kyrie");
        map.insert("10", "Ushiromiya Battler");
        map.insert("11", "Ushiromiya Ange");
        map.insert("12", "Ushiromiya Rosa");
        map.insert("13", "Ushiromiya Maria");
        map.insert("14", "Ronoue Genji");
        map.insert("15", "Shannon");
        map.insert("16", "Kanon");
        map.insert("17", "Gohda Toshiro");
        map.insert("18", "Kumasawa Chiyo");
        map.insert("19", "Nanjo Terumasa");
        map.insert("20", "Amakusa Juuza");
        map.insert("21", "Okonogi Tetsuro");
        map.insert("22", "Sumadera Kasumi");
        map.insert("23", "Professor Ootsuki");
        map.insert("24", "Captain Kawabata");
        map.insert("25", "Nanjo Masayuki");
        map.insert("26", "Kumasawa Sabakichi");
        map.insert("27", "Beatrice");
        map.insert("28", "Bernkastel");
        map.insert("29", "Lambdadelta");
        map.insert("30", "Virgilia");
        map.insert("31", "Ronove");
        map.insert("32", "Gaap");
        map.insert("33", "Sakutarou");
        map.insert("34", "Eva Beatrice");
        map.insert("35", "Chiester 45");
        map.insert("36", "Chiester 410");
        map.insert("37", "Chiester 00");
        map.insert("38", "Lucifer");
        map.insert("39", "Leviathan");
        map.insert("40", "Satan");
        map.insert("41", "Belphegor");
        map.insert("42", "Mammon");
        map.insert("43", "Beelzebub");
        map.insert("44", "Asmodeus");
        map.insert("45", "Goat");
        map.insert("46", "Furudo Erika");
        map.insert("47", "Dlanor A. Knox");
        map.insert("48", "Gertrude");
        map.insert("49", "Cornelia");
        map.insert("50", "Featherine");
        map.insert("51", "Zepar");
        map.insert("52", "Furfur");
        map.insert("53", "Ushiromiya Lion");
        map.insert("54", "Willard H. Wright");
        map.insert("55", "Clair");
        map.insert("56", "Hachijo Ikuko");
        map.insert("57", "Hachijo Tohya");
        map.insert("58", "Ushiromiya Kinzo");
        map.insert("59", "Bice");
        map.insert("60", "Beato the Elder");
        map.insert("99", "Misc Voices");
        map.insert("narrator", "Narrator");
        map
    };
}

/// 根据角色ID获取显示名称，未知ID返回 "Unknown"
pub fn character_name(id: &str) -> &'static str {
    CHARACTER_NAMES.get(id).copied().unwrap_or("Unknown")
}

/// 所有已知角色的副本
pub fn all_characters() -> HashMap<String, String> {
    CHARACTER_NAMES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
