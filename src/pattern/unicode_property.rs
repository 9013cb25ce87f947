//! Unicode property escape resolution
//!
//! Resolves the payload of a `\p{...}` / `\P{...}` escape to the code points
//! it matches. ECMAScript only accepts a fixed vocabulary:
//!
//! - `\p{Value}` - a `General_Category` value, or failing that a binary
//!   property (`\p{Lu}`, `\p{Letter}`, `\p{Alphabetic}`, `\p{ASCII}`)
//! - `\p{Property=Value}` - `General_Category`, `Script` or
//!   `Script_Extensions` with a value (`\p{Script=Greek}`, `\p{gc=Lu}`)
//!
//! Names and values are matched strictly against the canonical names and
//! aliases below, so `\p{Script=greek}` is rejected even though the Unicode
//! tables shipped with `regex-syntax` (where the code point data comes from)
//! would match it loosely.

use regex_syntax::hir::{Class, HirKind};

use super::code_point_set::{unicode_set, CodePointSet};
use super::error::{Result, RewriteError};
use super::property_cache;

/// Properties that take a value, as `(name or alias, canonical name)`
const NON_BINARY_PROPERTIES: &[(&str, &str)] = &[
    ("General_Category", "General_Category"),
    ("gc", "General_Category"),
    ("Script", "Script"),
    ("sc", "Script"),
    ("Script_Extensions", "Script_Extensions"),
    ("scx", "Script_Extensions"),
];

/// Binary properties usable in ECMAScript patterns, as
/// `(name or alias, canonical name)`
const BINARY_PROPERTIES: &[(&str, &str)] = &[
    ("ASCII", "ASCII"),
    ("ASCII_Hex_Digit", "ASCII_Hex_Digit"),
    ("AHex", "ASCII_Hex_Digit"),
    ("Alphabetic", "Alphabetic"),
    ("Alpha", "Alphabetic"),
    ("Any", "Any"),
    ("Assigned", "Assigned"),
    ("Bidi_Control", "Bidi_Control"),
    ("Bidi_C", "Bidi_Control"),
    ("Bidi_Mirrored", "Bidi_Mirrored"),
    ("Bidi_M", "Bidi_Mirrored"),
    ("Case_Ignorable", "Case_Ignorable"),
    ("CI", "Case_Ignorable"),
    ("Cased", "Cased"),
    ("Changes_When_Casefolded", "Changes_When_Casefolded"),
    ("CWCF", "Changes_When_Casefolded"),
    ("Changes_When_Casemapped", "Changes_When_Casemapped"),
    ("CWCM", "Changes_When_Casemapped"),
    ("Changes_When_Lowercased", "Changes_When_Lowercased"),
    ("CWL", "Changes_When_Lowercased"),
    ("Changes_When_NFKC_Casefolded", "Changes_When_NFKC_Casefolded"),
    ("CWKCF", "Changes_When_NFKC_Casefolded"),
    ("Changes_When_Titlecased", "Changes_When_Titlecased"),
    ("CWT", "Changes_When_Titlecased"),
    ("Changes_When_Uppercased", "Changes_When_Uppercased"),
    ("CWU", "Changes_When_Uppercased"),
    ("Dash", "Dash"),
    ("Default_Ignorable_Code_Point", "Default_Ignorable_Code_Point"),
    ("DI", "Default_Ignorable_Code_Point"),
    ("Deprecated", "Deprecated"),
    ("Dep", "Deprecated"),
    ("Diacritic", "Diacritic"),
    ("Dia", "Diacritic"),
    ("Emoji", "Emoji"),
    ("Emoji_Component", "Emoji_Component"),
    ("EComp", "Emoji_Component"),
    ("Emoji_Modifier", "Emoji_Modifier"),
    ("EMod", "Emoji_Modifier"),
    ("Emoji_Modifier_Base", "Emoji_Modifier_Base"),
    ("EBase", "Emoji_Modifier_Base"),
    ("Emoji_Presentation", "Emoji_Presentation"),
    ("EPres", "Emoji_Presentation"),
    ("Extended_Pictographic", "Extended_Pictographic"),
    ("ExtPict", "Extended_Pictographic"),
    ("Extender", "Extender"),
    ("Ext", "Extender"),
    ("Grapheme_Base", "Grapheme_Base"),
    ("Gr_Base", "Grapheme_Base"),
    ("Grapheme_Extend", "Grapheme_Extend"),
    ("Gr_Ext", "Grapheme_Extend"),
    ("Hex_Digit", "Hex_Digit"),
    ("Hex", "Hex_Digit"),
    ("IDS_Binary_Operator", "IDS_Binary_Operator"),
    ("IDSB", "IDS_Binary_Operator"),
    ("IDS_Trinary_Operator", "IDS_Trinary_Operator"),
    ("IDST", "IDS_Trinary_Operator"),
    ("ID_Continue", "ID_Continue"),
    ("IDC", "ID_Continue"),
    ("ID_Start", "ID_Start"),
    ("IDS", "ID_Start"),
    ("Ideographic", "Ideographic"),
    ("Ideo", "Ideographic"),
    ("Join_Control", "Join_Control"),
    ("Join_C", "Join_Control"),
    ("Logical_Order_Exception", "Logical_Order_Exception"),
    ("LOE", "Logical_Order_Exception"),
    ("Lowercase", "Lowercase"),
    ("Lower", "Lowercase"),
    ("Math", "Math"),
    ("Noncharacter_Code_Point", "Noncharacter_Code_Point"),
    ("NChar", "Noncharacter_Code_Point"),
    ("Pattern_Syntax", "Pattern_Syntax"),
    ("Pat_Syn", "Pattern_Syntax"),
    ("Pattern_White_Space", "Pattern_White_Space"),
    ("Pat_WS", "Pattern_White_Space"),
    ("Quotation_Mark", "Quotation_Mark"),
    ("QMark", "Quotation_Mark"),
    ("Radical", "Radical"),
    ("Regional_Indicator", "Regional_Indicator"),
    ("RI", "Regional_Indicator"),
    ("Sentence_Terminal", "Sentence_Terminal"),
    ("STerm", "Sentence_Terminal"),
    ("Soft_Dotted", "Soft_Dotted"),
    ("SD", "Soft_Dotted"),
    ("Terminal_Punctuation", "Terminal_Punctuation"),
    ("Term", "Terminal_Punctuation"),
    ("Unified_Ideograph", "Unified_Ideograph"),
    ("UIdeo", "Unified_Ideograph"),
    ("Uppercase", "Uppercase"),
    ("Upper", "Uppercase"),
    ("Variation_Selector", "Variation_Selector"),
    ("VS", "Variation_Selector"),
    ("White_Space", "White_Space"),
    ("space", "White_Space"),
    ("XID_Continue", "XID_Continue"),
    ("XIDC", "XID_Continue"),
    ("XID_Start", "XID_Start"),
    ("XIDS", "XID_Start"),
];

/// `General_Category` values, as `(name or alias, canonical name)`
const GENERAL_CATEGORY_VALUES: &[(&str, &str)] = &[
    ("Cased_Letter", "Cased_Letter"),
    ("LC", "Cased_Letter"),
    ("Close_Punctuation", "Close_Punctuation"),
    ("Pe", "Close_Punctuation"),
    ("Connector_Punctuation", "Connector_Punctuation"),
    ("Pc", "Connector_Punctuation"),
    ("Control", "Control"),
    ("Cc", "Control"),
    ("cntrl", "Control"),
    ("Currency_Symbol", "Currency_Symbol"),
    ("Sc", "Currency_Symbol"),
    ("Dash_Punctuation", "Dash_Punctuation"),
    ("Pd", "Dash_Punctuation"),
    ("Decimal_Number", "Decimal_Number"),
    ("Nd", "Decimal_Number"),
    ("digit", "Decimal_Number"),
    ("Enclosing_Mark", "Enclosing_Mark"),
    ("Me", "Enclosing_Mark"),
    ("Final_Punctuation", "Final_Punctuation"),
    ("Pf", "Final_Punctuation"),
    ("Format", "Format"),
    ("Cf", "Format"),
    ("Initial_Punctuation", "Initial_Punctuation"),
    ("Pi", "Initial_Punctuation"),
    ("Letter", "Letter"),
    ("L", "Letter"),
    ("Letter_Number", "Letter_Number"),
    ("Nl", "Letter_Number"),
    ("Line_Separator", "Line_Separator"),
    ("Zl", "Line_Separator"),
    ("Lowercase_Letter", "Lowercase_Letter"),
    ("Ll", "Lowercase_Letter"),
    ("Mark", "Mark"),
    ("M", "Mark"),
    ("Combining_Mark", "Mark"),
    ("Math_Symbol", "Math_Symbol"),
    ("Sm", "Math_Symbol"),
    ("Modifier_Letter", "Modifier_Letter"),
    ("Lm", "Modifier_Letter"),
    ("Modifier_Symbol", "Modifier_Symbol"),
    ("Sk", "Modifier_Symbol"),
    ("Nonspacing_Mark", "Nonspacing_Mark"),
    ("Mn", "Nonspacing_Mark"),
    ("Number", "Number"),
    ("N", "Number"),
    ("Open_Punctuation", "Open_Punctuation"),
    ("Ps", "Open_Punctuation"),
    ("Other", "Other"),
    ("C", "Other"),
    ("Other_Letter", "Other_Letter"),
    ("Lo", "Other_Letter"),
    ("Other_Number", "Other_Number"),
    ("No", "Other_Number"),
    ("Other_Punctuation", "Other_Punctuation"),
    ("Po", "Other_Punctuation"),
    ("Other_Symbol", "Other_Symbol"),
    ("So", "Other_Symbol"),
    ("Paragraph_Separator", "Paragraph_Separator"),
    ("Zp", "Paragraph_Separator"),
    ("Private_Use", "Private_Use"),
    ("Co", "Private_Use"),
    ("Punctuation", "Punctuation"),
    ("P", "Punctuation"),
    ("punct", "Punctuation"),
    ("Separator", "Separator"),
    ("Z", "Separator"),
    ("Space_Separator", "Space_Separator"),
    ("Zs", "Space_Separator"),
    ("Spacing_Mark", "Spacing_Mark"),
    ("Mc", "Spacing_Mark"),
    ("Surrogate", "Surrogate"),
    ("Cs", "Surrogate"),
    ("Symbol", "Symbol"),
    ("S", "Symbol"),
    ("Titlecase_Letter", "Titlecase_Letter"),
    ("Lt", "Titlecase_Letter"),
    ("Unassigned", "Unassigned"),
    ("Cn", "Unassigned"),
    ("Uppercase_Letter", "Uppercase_Letter"),
    ("Lu", "Uppercase_Letter"),
];

/// `Script` and `Script_Extensions` values, as `(name or alias, canonical name)`
const SCRIPT_VALUES: &[(&str, &str)] = &[
    ("Adlam", "Adlam"),
    ("Adlm", "Adlam"),
    ("Ahom", "Ahom"),
    ("Anatolian_Hieroglyphs", "Anatolian_Hieroglyphs"),
    ("Hluw", "Anatolian_Hieroglyphs"),
    ("Arabic", "Arabic"),
    ("Arab", "Arabic"),
    ("Armenian", "Armenian"),
    ("Armn", "Armenian"),
    ("Avestan", "Avestan"),
    ("Avst", "Avestan"),
    ("Balinese", "Balinese"),
    ("Bali", "Balinese"),
    ("Bamum", "Bamum"),
    ("Bamu", "Bamum"),
    ("Bassa_Vah", "Bassa_Vah"),
    ("Bass", "Bassa_Vah"),
    ("Batak", "Batak"),
    ("Batk", "Batak"),
    ("Bengali", "Bengali"),
    ("Beng", "Bengali"),
    ("Bhaiksuki", "Bhaiksuki"),
    ("Bhks", "Bhaiksuki"),
    ("Bopomofo", "Bopomofo"),
    ("Bopo", "Bopomofo"),
    ("Brahmi", "Brahmi"),
    ("Brah", "Brahmi"),
    ("Braille", "Braille"),
    ("Brai", "Braille"),
    ("Buginese", "Buginese"),
    ("Bugi", "Buginese"),
    ("Buhid", "Buhid"),
    ("Buhd", "Buhid"),
    ("Canadian_Aboriginal", "Canadian_Aboriginal"),
    ("Cans", "Canadian_Aboriginal"),
    ("Carian", "Carian"),
    ("Cari", "Carian"),
    ("Caucasian_Albanian", "Caucasian_Albanian"),
    ("Aghb", "Caucasian_Albanian"),
    ("Chakma", "Chakma"),
    ("Cakm", "Chakma"),
    ("Cham", "Cham"),
    ("Cherokee", "Cherokee"),
    ("Cher", "Cherokee"),
    ("Chorasmian", "Chorasmian"),
    ("Chrs", "Chorasmian"),
    ("Common", "Common"),
    ("Zyyy", "Common"),
    ("Coptic", "Coptic"),
    ("Copt", "Coptic"),
    ("Qaac", "Coptic"),
    ("Cuneiform", "Cuneiform"),
    ("Xsux", "Cuneiform"),
    ("Cypriot", "Cypriot"),
    ("Cprt", "Cypriot"),
    ("Cypro_Minoan", "Cypro_Minoan"),
    ("Cpmn", "Cypro_Minoan"),
    ("Cyrillic", "Cyrillic"),
    ("Cyrl", "Cyrillic"),
    ("Deseret", "Deseret"),
    ("Dsrt", "Deseret"),
    ("Devanagari", "Devanagari"),
    ("Deva", "Devanagari"),
    ("Dives_Akuru", "Dives_Akuru"),
    ("Diak", "Dives_Akuru"),
    ("Dogra", "Dogra"),
    ("Dogr", "Dogra"),
    ("Duployan", "Duployan"),
    ("Dupl", "Duployan"),
    ("Egyptian_Hieroglyphs", "Egyptian_Hieroglyphs"),
    ("Egyp", "Egyptian_Hieroglyphs"),
    ("Elbasan", "Elbasan"),
    ("Elba", "Elbasan"),
    ("Elymaic", "Elymaic"),
    ("Elym", "Elymaic"),
    ("Ethiopic", "Ethiopic"),
    ("Ethi", "Ethiopic"),
    ("Garay", "Garay"),
    ("Gara", "Garay"),
    ("Georgian", "Georgian"),
    ("Geor", "Georgian"),
    ("Glagolitic", "Glagolitic"),
    ("Glag", "Glagolitic"),
    ("Gothic", "Gothic"),
    ("Goth", "Gothic"),
    ("Grantha", "Grantha"),
    ("Gran", "Grantha"),
    ("Greek", "Greek"),
    ("Grek", "Greek"),
    ("Gujarati", "Gujarati"),
    ("Gujr", "Gujarati"),
    ("Gunjala_Gondi", "Gunjala_Gondi"),
    ("Gong", "Gunjala_Gondi"),
    ("Gurmukhi", "Gurmukhi"),
    ("Guru", "Gurmukhi"),
    ("Gurung_Khema", "Gurung_Khema"),
    ("Gukh", "Gurung_Khema"),
    ("Han", "Han"),
    ("Hani", "Han"),
    ("Hangul", "Hangul"),
    ("Hang", "Hangul"),
    ("Hanifi_Rohingya", "Hanifi_Rohingya"),
    ("Rohg", "Hanifi_Rohingya"),
    ("Hanunoo", "Hanunoo"),
    ("Hano", "Hanunoo"),
    ("Hatran", "Hatran"),
    ("Hatr", "Hatran"),
    ("Hebrew", "Hebrew"),
    ("Hebr", "Hebrew"),
    ("Hiragana", "Hiragana"),
    ("Hira", "Hiragana"),
    ("Imperial_Aramaic", "Imperial_Aramaic"),
    ("Armi", "Imperial_Aramaic"),
    ("Inherited", "Inherited"),
    ("Zinh", "Inherited"),
    ("Qaai", "Inherited"),
    ("Inscriptional_Pahlavi", "Inscriptional_Pahlavi"),
    ("Phli", "Inscriptional_Pahlavi"),
    ("Inscriptional_Parthian", "Inscriptional_Parthian"),
    ("Prti", "Inscriptional_Parthian"),
    ("Javanese", "Javanese"),
    ("Java", "Javanese"),
    ("Kaithi", "Kaithi"),
    ("Kthi", "Kaithi"),
    ("Kannada", "Kannada"),
    ("Knda", "Kannada"),
    ("Katakana", "Katakana"),
    ("Kana", "Katakana"),
    ("Katakana_Or_Hiragana", "Katakana_Or_Hiragana"),
    ("Hrkt", "Katakana_Or_Hiragana"),
    ("Kawi", "Kawi"),
    ("Kayah_Li", "Kayah_Li"),
    ("Kali", "Kayah_Li"),
    ("Kharoshthi", "Kharoshthi"),
    ("Khar", "Kharoshthi"),
    ("Khitan_Small_Script", "Khitan_Small_Script"),
    ("Kits", "Khitan_Small_Script"),
    ("Khmer", "Khmer"),
    ("Khmr", "Khmer"),
    ("Khojki", "Khojki"),
    ("Khoj", "Khojki"),
    ("Khudawadi", "Khudawadi"),
    ("Sind", "Khudawadi"),
    ("Kirat_Rai", "Kirat_Rai"),
    ("Krai", "Kirat_Rai"),
    ("Lao", "Lao"),
    ("Laoo", "Lao"),
    ("Latin", "Latin"),
    ("Latn", "Latin"),
    ("Lepcha", "Lepcha"),
    ("Lepc", "Lepcha"),
    ("Limbu", "Limbu"),
    ("Limb", "Limbu"),
    ("Linear_A", "Linear_A"),
    ("Lina", "Linear_A"),
    ("Linear_B", "Linear_B"),
    ("Linb", "Linear_B"),
    ("Lisu", "Lisu"),
    ("Lycian", "Lycian"),
    ("Lyci", "Lycian"),
    ("Lydian", "Lydian"),
    ("Lydi", "Lydian"),
    ("Mahajani", "Mahajani"),
    ("Mahj", "Mahajani"),
    ("Makasar", "Makasar"),
    ("Maka", "Makasar"),
    ("Malayalam", "Malayalam"),
    ("Mlym", "Malayalam"),
    ("Mandaic", "Mandaic"),
    ("Mand", "Mandaic"),
    ("Manichaean", "Manichaean"),
    ("Mani", "Manichaean"),
    ("Marchen", "Marchen"),
    ("Marc", "Marchen"),
    ("Masaram_Gondi", "Masaram_Gondi"),
    ("Gonm", "Masaram_Gondi"),
    ("Medefaidrin", "Medefaidrin"),
    ("Medf", "Medefaidrin"),
    ("Meetei_Mayek", "Meetei_Mayek"),
    ("Mtei", "Meetei_Mayek"),
    ("Mende_Kikakui", "Mende_Kikakui"),
    ("Mend", "Mende_Kikakui"),
    ("Meroitic_Cursive", "Meroitic_Cursive"),
    ("Merc", "Meroitic_Cursive"),
    ("Meroitic_Hieroglyphs", "Meroitic_Hieroglyphs"),
    ("Mero", "Meroitic_Hieroglyphs"),
    ("Miao", "Miao"),
    ("Plrd", "Miao"),
    ("Modi", "Modi"),
    ("Mongolian", "Mongolian"),
    ("Mong", "Mongolian"),
    ("Mro", "Mro"),
    ("Mroo", "Mro"),
    ("Multani", "Multani"),
    ("Mult", "Multani"),
    ("Myanmar", "Myanmar"),
    ("Mymr", "Myanmar"),
    ("Nabataean", "Nabataean"),
    ("Nbat", "Nabataean"),
    ("Nag_Mundari", "Nag_Mundari"),
    ("Nagm", "Nag_Mundari"),
    ("Nandinagari", "Nandinagari"),
    ("Nand", "Nandinagari"),
    ("New_Tai_Lue", "New_Tai_Lue"),
    ("Talu", "New_Tai_Lue"),
    ("Newa", "Newa"),
    ("Nko", "Nko"),
    ("Nkoo", "Nko"),
    ("Nushu", "Nushu"),
    ("Nshu", "Nushu"),
    ("Nyiakeng_Puachue_Hmong", "Nyiakeng_Puachue_Hmong"),
    ("Hmnp", "Nyiakeng_Puachue_Hmong"),
    ("Ogham", "Ogham"),
    ("Ogam", "Ogham"),
    ("Ol_Chiki", "Ol_Chiki"),
    ("Olck", "Ol_Chiki"),
    ("Ol_Onal", "Ol_Onal"),
    ("Onao", "Ol_Onal"),
    ("Old_Hungarian", "Old_Hungarian"),
    ("Hung", "Old_Hungarian"),
    ("Old_Italic", "Old_Italic"),
    ("Ital", "Old_Italic"),
    ("Old_North_Arabian", "Old_North_Arabian"),
    ("Narb", "Old_North_Arabian"),
    ("Old_Permic", "Old_Permic"),
    ("Perm", "Old_Permic"),
    ("Old_Persian", "Old_Persian"),
    ("Xpeo", "Old_Persian"),
    ("Old_Sogdian", "Old_Sogdian"),
    ("Sogo", "Old_Sogdian"),
    ("Old_South_Arabian", "Old_South_Arabian"),
    ("Sarb", "Old_South_Arabian"),
    ("Old_Turkic", "Old_Turkic"),
    ("Orkh", "Old_Turkic"),
    ("Old_Uyghur", "Old_Uyghur"),
    ("Ougr", "Old_Uyghur"),
    ("Oriya", "Oriya"),
    ("Orya", "Oriya"),
    ("Osage", "Osage"),
    ("Osge", "Osage"),
    ("Osmanya", "Osmanya"),
    ("Osma", "Osmanya"),
    ("Pahawh_Hmong", "Pahawh_Hmong"),
    ("Hmng", "Pahawh_Hmong"),
    ("Palmyrene", "Palmyrene"),
    ("Palm", "Palmyrene"),
    ("Pau_Cin_Hau", "Pau_Cin_Hau"),
    ("Pauc", "Pau_Cin_Hau"),
    ("Phags_Pa", "Phags_Pa"),
    ("Phag", "Phags_Pa"),
    ("Phoenician", "Phoenician"),
    ("Phnx", "Phoenician"),
    ("Psalter_Pahlavi", "Psalter_Pahlavi"),
    ("Phlp", "Psalter_Pahlavi"),
    ("Rejang", "Rejang"),
    ("Rjng", "Rejang"),
    ("Runic", "Runic"),
    ("Runr", "Runic"),
    ("Samaritan", "Samaritan"),
    ("Samr", "Samaritan"),
    ("Saurashtra", "Saurashtra"),
    ("Saur", "Saurashtra"),
    ("Sharada", "Sharada"),
    ("Shrd", "Sharada"),
    ("Shavian", "Shavian"),
    ("Shaw", "Shavian"),
    ("Siddham", "Siddham"),
    ("Sidd", "Siddham"),
    ("SignWriting", "SignWriting"),
    ("Sgnw", "SignWriting"),
    ("Sinhala", "Sinhala"),
    ("Sinh", "Sinhala"),
    ("Sogdian", "Sogdian"),
    ("Sogd", "Sogdian"),
    ("Sora_Sompeng", "Sora_Sompeng"),
    ("Sora", "Sora_Sompeng"),
    ("Soyombo", "Soyombo"),
    ("Soyo", "Soyombo"),
    ("Sundanese", "Sundanese"),
    ("Sund", "Sundanese"),
    ("Sunuwar", "Sunuwar"),
    ("Sunu", "Sunuwar"),
    ("Syloti_Nagri", "Syloti_Nagri"),
    ("Sylo", "Syloti_Nagri"),
    ("Syriac", "Syriac"),
    ("Syrc", "Syriac"),
    ("Tagalog", "Tagalog"),
    ("Tglg", "Tagalog"),
    ("Tagbanwa", "Tagbanwa"),
    ("Tagb", "Tagbanwa"),
    ("Tai_Le", "Tai_Le"),
    ("Tale", "Tai_Le"),
    ("Tai_Tham", "Tai_Tham"),
    ("Lana", "Tai_Tham"),
    ("Tai_Viet", "Tai_Viet"),
    ("Tavt", "Tai_Viet"),
    ("Takri", "Takri"),
    ("Takr", "Takri"),
    ("Tamil", "Tamil"),
    ("Taml", "Tamil"),
    ("Tangsa", "Tangsa"),
    ("Tnsa", "Tangsa"),
    ("Tangut", "Tangut"),
    ("Tang", "Tangut"),
    ("Telugu", "Telugu"),
    ("Telu", "Telugu"),
    ("Thaana", "Thaana"),
    ("Thaa", "Thaana"),
    ("Thai", "Thai"),
    ("Tibetan", "Tibetan"),
    ("Tibt", "Tibetan"),
    ("Tifinagh", "Tifinagh"),
    ("Tfng", "Tifinagh"),
    ("Tirhuta", "Tirhuta"),
    ("Tirh", "Tirhuta"),
    ("Todhri", "Todhri"),
    ("Todr", "Todhri"),
    ("Toto", "Toto"),
    ("Tulu_Tigalari", "Tulu_Tigalari"),
    ("Tutg", "Tulu_Tigalari"),
    ("Ugaritic", "Ugaritic"),
    ("Ugar", "Ugaritic"),
    ("Unknown", "Unknown"),
    ("Zzzz", "Unknown"),
    ("Vai", "Vai"),
    ("Vaii", "Vai"),
    ("Vithkuqi", "Vithkuqi"),
    ("Vith", "Vithkuqi"),
    ("Wancho", "Wancho"),
    ("Wcho", "Wancho"),
    ("Warang_Citi", "Warang_Citi"),
    ("Wara", "Warang_Citi"),
    ("Yezidi", "Yezidi"),
    ("Yezi", "Yezidi"),
    ("Yi", "Yi"),
    ("Yiii", "Yi"),
    ("Zanabazar_Square", "Zanabazar_Square"),
    ("Zanb", "Zanabazar_Square"),
];

const SURROGATES: (u32, u32) = (0xD800, 0xDFFF);

fn lookup(table: &'static [(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
}

/// Canonical name of a property that takes a value
pub fn canonical_property(name: &str) -> Option<&'static str> {
    lookup(NON_BINARY_PROPERTIES, name)
}

/// Canonical name of a binary property
pub fn canonical_binary_property(name: &str) -> Option<&'static str> {
    lookup(BINARY_PROPERTIES, name)
}

/// Canonical name of a `General_Category` value
pub fn canonical_general_category(value: &str) -> Option<&'static str> {
    lookup(GENERAL_CATEGORY_VALUES, value)
}

/// Canonical name of a `Script` or `Script_Extensions` value
pub fn canonical_script(value: &str) -> Option<&'static str> {
    lookup(SCRIPT_VALUES, value)
}

/// Resolve the payload of a property escape
///
/// `negative` selects `\P{...}`: the complement relative to every code
/// point. The returned set is an independent copy.
///
/// # Example
///
/// ```rust
/// use es_regex_rewrite::pattern::unicode_property::resolve_property_escape;
///
/// let upper = resolve_property_escape("Lu", false).unwrap();
/// assert!(upper.contains('A' as u32));
/// assert!(!upper.contains('a' as u32));
///
/// let not_upper = resolve_property_escape("Lu", true).unwrap();
/// assert!(not_upper.contains('a' as u32));
/// ```
pub fn resolve_property_escape(payload: &str, negative: bool) -> Result<CodePointSet> {
    log_debug!("resolving property escape {}", payload);

    let set = match payload.split_once('=') {
        None => resolve_lone_name_or_value(payload)?,
        Some((property, value)) => resolve_property_value(property, value)?,
    };

    if negative {
        let mut complement = unicode_set().clone();
        complement.remove_set(&set);
        Ok(complement)
    } else {
        Ok(set)
    }
}

/// `\p{Value}`: a general category first, then a binary property
fn resolve_lone_name_or_value(token: &str) -> Result<CodePointSet> {
    let unknown = || RewriteError::UnknownProperty {
        property: token.to_string(),
        value: None,
    };

    if let Some(category) = canonical_general_category(token) {
        return property_value_set("General_Category", Some(category)).ok_or_else(unknown);
    }
    let property = canonical_binary_property(token).ok_or_else(unknown)?;
    property_value_set(property, None).ok_or_else(unknown)
}

/// `\p{Property=Value}`
fn resolve_property_value(property: &str, value: &str) -> Result<CodePointSet> {
    let unknown = || RewriteError::UnknownProperty {
        property: property.to_string(),
        value: Some(value.to_string()),
    };

    let canonical = canonical_property(property).ok_or_else(unknown)?;
    let value = if canonical == "General_Category" {
        canonical_general_category(value)
    } else {
        canonical_script(value)
    }
    .ok_or_else(unknown)?;

    property_value_set(canonical, Some(value)).ok_or_else(unknown)
}

/// Load a canonical property (and value) through the cache
fn property_value_set(property: &str, value: Option<&str>) -> Option<CodePointSet> {
    let key = match value {
        Some(value) => format!("{}={}", property, value),
        None => property.to_string(),
    };

    property_cache::get_or_resolve(&key, || match (property, value) {
        ("Any", None) => Some(unicode_set().clone()),
        ("General_Category", Some("Surrogate")) => {
            Some(CodePointSet::from_range(SURROGATES.0, SURROGATES.1))
        }
        ("General_Category", Some("Other")) => {
            // The tables only cover scalar values; `Other` includes `Cs`
            let mut set = load_from_tables(&key)?;
            set.add_range(SURROGATES.0, SURROGATES.1);
            Some(set)
        }
        (_, Some("Katakana_Or_Hiragana")) => Some(CodePointSet::new()),
        (_, Some("Unknown")) => unknown_script_set(),
        _ => load_from_tables(&key),
    })
}

/// Code points without a script: unassigned, private use and surrogates
fn unknown_script_set() -> Option<CodePointSet> {
    let mut set = load_from_tables("General_Category=Unassigned")?;
    set.add_set(&load_from_tables("General_Category=Private_Use")?);
    set.add_range(SURROGATES.0, SURROGATES.1);
    Some(set)
}

/// Query the Unicode tables for `\p{query}`
fn load_from_tables(query: &str) -> Option<CodePointSet> {
    let hir = regex_syntax::ParserBuilder::new()
        .build()
        .parse(&format!("\\p{{{}}}", query))
        .ok()?;

    match hir.kind() {
        HirKind::Class(Class::Unicode(class)) => {
            let mut set = CodePointSet::new();
            for range in class.iter() {
                set.add_range(range.start() as u32, range.end() as u32);
            }
            Some(set)
        }
        // Single code point classes are simplified to literals
        HirKind::Literal(literal) => {
            let text = std::str::from_utf8(&literal.0).ok()?;
            Some(text.chars().map(|c| c as u32).collect())
        }
        // Empty classes are simplified to a never-matching byte class
        HirKind::Class(Class::Bytes(class)) if class.ranges().is_empty() => {
            Some(CodePointSet::new())
        }
        _ => None,
    }
}
