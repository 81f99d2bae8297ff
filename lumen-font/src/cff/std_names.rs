//! The CFF standard strings and the Standard Encoding.

/// The 391 standard strings shared by every CFF font.
///
/// String IDs below 391 index into this table; higher IDs index the
/// font's own String INDEX.
pub(crate) const STANDARD_STRINGS: [&str; 391] = [
    ".notdef", "space", "exclam", "quotedbl", "numbersign", "dollar", "percent", "ampersand",
    "quoteright", "parenleft", "parenright", "asterisk", "plus", "comma", "hyphen", "period",
    "slash", "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    "colon", "semicolon", "less", "equal", "greater", "question", "at", "A", "B", "C", "D", "E",
    "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T", "U", "V", "W", "X",
    "Y", "Z", "bracketleft", "backslash", "bracketright", "asciicircum", "underscore", "quoteleft",
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z", "braceleft", "bar", "braceright", "asciitilde",
    "exclamdown", "cent", "sterling", "fraction", "yen", "florin", "section", "currency",
    "quotesingle", "quotedblleft", "guillemotleft", "guilsinglleft", "guilsinglright", "fi", "fl",
    "endash", "dagger", "daggerdbl", "periodcentered", "paragraph", "bullet", "quotesinglbase",
    "quotedblbase", "quotedblright", "guillemotright", "ellipsis", "perthousand", "questiondown",
    "grave", "acute", "circumflex", "tilde", "macron", "breve", "dotaccent", "dieresis", "ring",
    "cedilla", "hungarumlaut", "ogonek", "caron", "emdash", "AE", "ordfeminine", "Lslash",
    "Oslash", "OE", "ordmasculine", "ae", "dotlessi", "lslash", "oslash", "oe", "germandbls",
    "onesuperior", "logicalnot", "mu", "trademark", "Eth", "onehalf", "plusminus", "Thorn",
    "onequarter", "divide", "brokenbar", "degree", "thorn", "threequarters", "twosuperior",
    "registered", "minus", "eth", "multiply", "threesuperior", "copyright", "Aacute",
    "Acircumflex", "Adieresis", "Agrave", "Aring", "Atilde", "Ccedilla", "Eacute", "Ecircumflex",
    "Edieresis", "Egrave", "Iacute", "Icircumflex", "Idieresis", "Igrave", "Ntilde", "Oacute",
    "Ocircumflex", "Odieresis", "Ograve", "Otilde", "Scaron", "Uacute", "Ucircumflex", "Udieresis",
    "Ugrave", "Yacute", "Ydieresis", "Zcaron", "aacute", "acircumflex", "adieresis", "agrave",
    "aring", "atilde", "ccedilla", "eacute", "ecircumflex", "edieresis", "egrave", "iacute",
    "icircumflex", "idieresis", "igrave", "ntilde", "oacute", "ocircumflex", "odieresis", "ograve",
    "otilde", "scaron", "uacute", "ucircumflex", "udieresis", "ugrave", "yacute", "ydieresis",
    "zcaron", "exclamsmall", "Hungarumlautsmall", "dollaroldstyle", "dollarsuperior",
    "ampersandsmall", "Acutesmall", "parenleftsuperior", "parenrightsuperior", "twodotenleader",
    "onedotenleader", "zerooldstyle", "oneoldstyle", "twooldstyle", "threeoldstyle",
    "fouroldstyle", "fiveoldstyle", "sixoldstyle", "sevenoldstyle", "eightoldstyle",
    "nineoldstyle", "commasuperior", "threequartersemdash", "periodsuperior", "questionsmall",
    "asuperior", "bsuperior", "centsuperior", "dsuperior", "esuperior", "isuperior", "lsuperior",
    "msuperior", "nsuperior", "osuperior", "rsuperior", "ssuperior", "tsuperior", "ff", "ffi",
    "ffl", "parenleftinferior", "parenrightinferior", "Circumflexsmall", "hyphensuperior",
    "Gravesmall", "Asmall", "Bsmall", "Csmall", "Dsmall", "Esmall", "Fsmall", "Gsmall", "Hsmall",
    "Ismall", "Jsmall", "Ksmall", "Lsmall", "Msmall", "Nsmall", "Osmall", "Psmall", "Qsmall",
    "Rsmall", "Ssmall", "Tsmall", "Usmall", "Vsmall", "Wsmall", "Xsmall", "Ysmall", "Zsmall",
    "colonmonetary", "onefitted", "rupiah", "Tildesmall", "exclamdownsmall", "centoldstyle",
    "Lslashsmall", "Scaronsmall", "Zcaronsmall", "Dieresissmall", "Brevesmall", "Caronsmall",
    "Dotaccentsmall", "Macronsmall", "figuredash", "hypheninferior", "Ogoneksmall", "Ringsmall",
    "Cedillasmall", "questiondownsmall", "oneeighth", "threeeighths", "fiveeighths",
    "seveneighths", "onethird", "twothirds", "zerosuperior", "foursuperior", "fivesuperior",
    "sixsuperior", "sevensuperior", "eightsuperior", "ninesuperior", "zeroinferior", "oneinferior",
    "twoinferior", "threeinferior", "fourinferior", "fiveinferior", "sixinferior", "seveninferior",
    "eightinferior", "nineinferior", "centinferior", "dollarinferior", "periodinferior",
    "commainferior", "Agravesmall", "Aacutesmall", "Acircumflexsmall", "Atildesmall",
    "Adieresissmall", "Aringsmall", "AEsmall", "Ccedillasmall", "Egravesmall", "Eacutesmall",
    "Ecircumflexsmall", "Edieresissmall", "Igravesmall", "Iacutesmall", "Icircumflexsmall",
    "Idieresissmall", "Ethsmall", "Ntildesmall", "Ogravesmall", "Oacutesmall", "Ocircumflexsmall",
    "Otildesmall", "Odieresissmall", "OEsmall", "Oslashsmall", "Ugravesmall", "Uacutesmall",
    "Ucircumflexsmall", "Udieresissmall", "Yacutesmall", "Thornsmall", "Ydieresissmall", "001.000",
    "001.001", "001.002", "001.003", "Black", "Bold", "Book", "Light", "Medium", "Regular",
    "Roman", "Semibold",
];

/// Maps a standard string to its string ID.
pub(crate) static STANDARD_SID_BY_NAME: phf::Map<&'static str, u16> = phf::phf_map! {
    ".notdef" => 0,
    "space" => 1,
    "exclam" => 2,
    "quotedbl" => 3,
    "numbersign" => 4,
    "dollar" => 5,
    "percent" => 6,
    "ampersand" => 7,
    "quoteright" => 8,
    "parenleft" => 9,
    "parenright" => 10,
    "asterisk" => 11,
    "plus" => 12,
    "comma" => 13,
    "hyphen" => 14,
    "period" => 15,
    "slash" => 16,
    "zero" => 17,
    "one" => 18,
    "two" => 19,
    "three" => 20,
    "four" => 21,
    "five" => 22,
    "six" => 23,
    "seven" => 24,
    "eight" => 25,
    "nine" => 26,
    "colon" => 27,
    "semicolon" => 28,
    "less" => 29,
    "equal" => 30,
    "greater" => 31,
    "question" => 32,
    "at" => 33,
    "A" => 34,
    "B" => 35,
    "C" => 36,
    "D" => 37,
    "E" => 38,
    "F" => 39,
    "G" => 40,
    "H" => 41,
    "I" => 42,
    "J" => 43,
    "K" => 44,
    "L" => 45,
    "M" => 46,
    "N" => 47,
    "O" => 48,
    "P" => 49,
    "Q" => 50,
    "R" => 51,
    "S" => 52,
    "T" => 53,
    "U" => 54,
    "V" => 55,
    "W" => 56,
    "X" => 57,
    "Y" => 58,
    "Z" => 59,
    "bracketleft" => 60,
    "backslash" => 61,
    "bracketright" => 62,
    "asciicircum" => 63,
    "underscore" => 64,
    "quoteleft" => 65,
    "a" => 66,
    "b" => 67,
    "c" => 68,
    "d" => 69,
    "e" => 70,
    "f" => 71,
    "g" => 72,
    "h" => 73,
    "i" => 74,
    "j" => 75,
    "k" => 76,
    "l" => 77,
    "m" => 78,
    "n" => 79,
    "o" => 80,
    "p" => 81,
    "q" => 82,
    "r" => 83,
    "s" => 84,
    "t" => 85,
    "u" => 86,
    "v" => 87,
    "w" => 88,
    "x" => 89,
    "y" => 90,
    "z" => 91,
    "braceleft" => 92,
    "bar" => 93,
    "braceright" => 94,
    "asciitilde" => 95,
    "exclamdown" => 96,
    "cent" => 97,
    "sterling" => 98,
    "fraction" => 99,
    "yen" => 100,
    "florin" => 101,
    "section" => 102,
    "currency" => 103,
    "quotesingle" => 104,
    "quotedblleft" => 105,
    "guillemotleft" => 106,
    "guilsinglleft" => 107,
    "guilsinglright" => 108,
    "fi" => 109,
    "fl" => 110,
    "endash" => 111,
    "dagger" => 112,
    "daggerdbl" => 113,
    "periodcentered" => 114,
    "paragraph" => 115,
    "bullet" => 116,
    "quotesinglbase" => 117,
    "quotedblbase" => 118,
    "quotedblright" => 119,
    "guillemotright" => 120,
    "ellipsis" => 121,
    "perthousand" => 122,
    "questiondown" => 123,
    "grave" => 124,
    "acute" => 125,
    "circumflex" => 126,
    "tilde" => 127,
    "macron" => 128,
    "breve" => 129,
    "dotaccent" => 130,
    "dieresis" => 131,
    "ring" => 132,
    "cedilla" => 133,
    "hungarumlaut" => 134,
    "ogonek" => 135,
    "caron" => 136,
    "emdash" => 137,
    "AE" => 138,
    "ordfeminine" => 139,
    "Lslash" => 140,
    "Oslash" => 141,
    "OE" => 142,
    "ordmasculine" => 143,
    "ae" => 144,
    "dotlessi" => 145,
    "lslash" => 146,
    "oslash" => 147,
    "oe" => 148,
    "germandbls" => 149,
    "onesuperior" => 150,
    "logicalnot" => 151,
    "mu" => 152,
    "trademark" => 153,
    "Eth" => 154,
    "onehalf" => 155,
    "plusminus" => 156,
    "Thorn" => 157,
    "onequarter" => 158,
    "divide" => 159,
    "brokenbar" => 160,
    "degree" => 161,
    "thorn" => 162,
    "threequarters" => 163,
    "twosuperior" => 164,
    "registered" => 165,
    "minus" => 166,
    "eth" => 167,
    "multiply" => 168,
    "threesuperior" => 169,
    "copyright" => 170,
    "Aacute" => 171,
    "Acircumflex" => 172,
    "Adieresis" => 173,
    "Agrave" => 174,
    "Aring" => 175,
    "Atilde" => 176,
    "Ccedilla" => 177,
    "Eacute" => 178,
    "Ecircumflex" => 179,
    "Edieresis" => 180,
    "Egrave" => 181,
    "Iacute" => 182,
    "Icircumflex" => 183,
    "Idieresis" => 184,
    "Igrave" => 185,
    "Ntilde" => 186,
    "Oacute" => 187,
    "Ocircumflex" => 188,
    "Odieresis" => 189,
    "Ograve" => 190,
    "Otilde" => 191,
    "Scaron" => 192,
    "Uacute" => 193,
    "Ucircumflex" => 194,
    "Udieresis" => 195,
    "Ugrave" => 196,
    "Yacute" => 197,
    "Ydieresis" => 198,
    "Zcaron" => 199,
    "aacute" => 200,
    "acircumflex" => 201,
    "adieresis" => 202,
    "agrave" => 203,
    "aring" => 204,
    "atilde" => 205,
    "ccedilla" => 206,
    "eacute" => 207,
    "ecircumflex" => 208,
    "edieresis" => 209,
    "egrave" => 210,
    "iacute" => 211,
    "icircumflex" => 212,
    "idieresis" => 213,
    "igrave" => 214,
    "ntilde" => 215,
    "oacute" => 216,
    "ocircumflex" => 217,
    "odieresis" => 218,
    "ograve" => 219,
    "otilde" => 220,
    "scaron" => 221,
    "uacute" => 222,
    "ucircumflex" => 223,
    "udieresis" => 224,
    "ugrave" => 225,
    "yacute" => 226,
    "ydieresis" => 227,
    "zcaron" => 228,
    "exclamsmall" => 229,
    "Hungarumlautsmall" => 230,
    "dollaroldstyle" => 231,
    "dollarsuperior" => 232,
    "ampersandsmall" => 233,
    "Acutesmall" => 234,
    "parenleftsuperior" => 235,
    "parenrightsuperior" => 236,
    "twodotenleader" => 237,
    "onedotenleader" => 238,
    "zerooldstyle" => 239,
    "oneoldstyle" => 240,
    "twooldstyle" => 241,
    "threeoldstyle" => 242,
    "fouroldstyle" => 243,
    "fiveoldstyle" => 244,
    "sixoldstyle" => 245,
    "sevenoldstyle" => 246,
    "eightoldstyle" => 247,
    "nineoldstyle" => 248,
    "commasuperior" => 249,
    "threequartersemdash" => 250,
    "periodsuperior" => 251,
    "questionsmall" => 252,
    "asuperior" => 253,
    "bsuperior" => 254,
    "centsuperior" => 255,
    "dsuperior" => 256,
    "esuperior" => 257,
    "isuperior" => 258,
    "lsuperior" => 259,
    "msuperior" => 260,
    "nsuperior" => 261,
    "osuperior" => 262,
    "rsuperior" => 263,
    "ssuperior" => 264,
    "tsuperior" => 265,
    "ff" => 266,
    "ffi" => 267,
    "ffl" => 268,
    "parenleftinferior" => 269,
    "parenrightinferior" => 270,
    "Circumflexsmall" => 271,
    "hyphensuperior" => 272,
    "Gravesmall" => 273,
    "Asmall" => 274,
    "Bsmall" => 275,
    "Csmall" => 276,
    "Dsmall" => 277,
    "Esmall" => 278,
    "Fsmall" => 279,
    "Gsmall" => 280,
    "Hsmall" => 281,
    "Ismall" => 282,
    "Jsmall" => 283,
    "Ksmall" => 284,
    "Lsmall" => 285,
    "Msmall" => 286,
    "Nsmall" => 287,
    "Osmall" => 288,
    "Psmall" => 289,
    "Qsmall" => 290,
    "Rsmall" => 291,
    "Ssmall" => 292,
    "Tsmall" => 293,
    "Usmall" => 294,
    "Vsmall" => 295,
    "Wsmall" => 296,
    "Xsmall" => 297,
    "Ysmall" => 298,
    "Zsmall" => 299,
    "colonmonetary" => 300,
    "onefitted" => 301,
    "rupiah" => 302,
    "Tildesmall" => 303,
    "exclamdownsmall" => 304,
    "centoldstyle" => 305,
    "Lslashsmall" => 306,
    "Scaronsmall" => 307,
    "Zcaronsmall" => 308,
    "Dieresissmall" => 309,
    "Brevesmall" => 310,
    "Caronsmall" => 311,
    "Dotaccentsmall" => 312,
    "Macronsmall" => 313,
    "figuredash" => 314,
    "hypheninferior" => 315,
    "Ogoneksmall" => 316,
    "Ringsmall" => 317,
    "Cedillasmall" => 318,
    "questiondownsmall" => 319,
    "oneeighth" => 320,
    "threeeighths" => 321,
    "fiveeighths" => 322,
    "seveneighths" => 323,
    "onethird" => 324,
    "twothirds" => 325,
    "zerosuperior" => 326,
    "foursuperior" => 327,
    "fivesuperior" => 328,
    "sixsuperior" => 329,
    "sevensuperior" => 330,
    "eightsuperior" => 331,
    "ninesuperior" => 332,
    "zeroinferior" => 333,
    "oneinferior" => 334,
    "twoinferior" => 335,
    "threeinferior" => 336,
    "fourinferior" => 337,
    "fiveinferior" => 338,
    "sixinferior" => 339,
    "seveninferior" => 340,
    "eightinferior" => 341,
    "nineinferior" => 342,
    "centinferior" => 343,
    "dollarinferior" => 344,
    "periodinferior" => 345,
    "commainferior" => 346,
    "Agravesmall" => 347,
    "Aacutesmall" => 348,
    "Acircumflexsmall" => 349,
    "Atildesmall" => 350,
    "Adieresissmall" => 351,
    "Aringsmall" => 352,
    "AEsmall" => 353,
    "Ccedillasmall" => 354,
    "Egravesmall" => 355,
    "Eacutesmall" => 356,
    "Ecircumflexsmall" => 357,
    "Edieresissmall" => 358,
    "Igravesmall" => 359,
    "Iacutesmall" => 360,
    "Icircumflexsmall" => 361,
    "Idieresissmall" => 362,
    "Ethsmall" => 363,
    "Ntildesmall" => 364,
    "Ogravesmall" => 365,
    "Oacutesmall" => 366,
    "Ocircumflexsmall" => 367,
    "Otildesmall" => 368,
    "Odieresissmall" => 369,
    "OEsmall" => 370,
    "Oslashsmall" => 371,
    "Ugravesmall" => 372,
    "Uacutesmall" => 373,
    "Ucircumflexsmall" => 374,
    "Udieresissmall" => 375,
    "Yacutesmall" => 376,
    "Thornsmall" => 377,
    "Ydieresissmall" => 378,
    "001.000" => 379,
    "001.001" => 380,
    "001.002" => 381,
    "001.003" => 382,
    "Black" => 383,
    "Bold" => 384,
    "Book" => 385,
    "Light" => 386,
    "Medium" => 387,
    "Regular" => 388,
    "Roman" => 389,
    "Semibold" => 390,
};

/// The Standard Encoding, mapping character codes to string IDs.
pub(crate) const STANDARD_ENCODING: [u16; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
    17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32,
    33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48,
    49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64,
    65, 66, 67, 68, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79, 80,
    81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94, 95, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 96, 97, 98, 99, 100, 101, 102, 103, 104, 105, 106, 107, 108, 109, 110,
    0, 111, 112, 113, 114, 0, 115, 116, 117, 118, 119, 120, 121, 122, 0, 123,
    0, 124, 125, 126, 127, 128, 129, 130, 131, 0, 132, 133, 0, 134, 135, 136,
    137, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 138, 0, 139, 0, 0, 0, 0, 0, 140, 141, 142, 143, 0, 0, 0,
    0, 144, 0, 0, 0, 145, 0, 0, 146, 147, 148, 149, 0, 0, 0, 0,
];

/// The Expert Encoding, mapping character codes to string IDs.
pub(crate) const EXPERT_ENCODING: [u16; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 229, 230, 0, 231, 232, 233, 234, 235, 236, 237, 238, 13, 14, 15, 99,
    239, 240, 241, 242, 243, 244, 245, 246, 247, 248, 27, 28, 249, 250, 251, 252,
    0, 253, 254, 255, 256, 257, 0, 0, 0, 258, 0, 0, 259, 260, 261, 262,
    0, 0, 263, 264, 265, 0, 266, 109, 110, 267, 268, 269, 0, 270, 271, 272,
    273, 274, 275, 276, 277, 278, 279, 280, 281, 282, 283, 284, 285, 286, 287, 288,
    289, 290, 291, 292, 293, 294, 295, 296, 297, 298, 299, 300, 301, 302, 303, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 304, 305, 306, 0, 0, 307, 308, 309, 310, 311, 0, 312, 0, 0, 313,
    0, 0, 314, 315, 0, 0, 316, 317, 318, 0, 0, 0, 158, 155, 163, 319,
    320, 321, 322, 323, 324, 325, 0, 0, 326, 150, 164, 169, 327, 328, 329, 330,
    331, 332, 333, 334, 335, 336, 337, 338, 339, 340, 341, 342, 343, 344, 345, 346,
    347, 348, 349, 350, 351, 352, 353, 354, 355, 356, 357, 358, 359, 360, 361, 362,
    363, 364, 365, 366, 367, 368, 369, 370, 371, 372, 373, 374, 375, 376, 377, 378,
];

/// The predefined Expert charset, one string ID per glyph.
pub(crate) const EXPERT_CHARSET: [u16; 166] = [
    0, 1, 229, 230, 231, 232, 233, 234, 235, 236, 237, 238,
    13, 14, 15, 99, 239, 240, 241, 242, 243, 244, 245, 246,
    247, 248, 27, 28, 249, 250, 251, 252, 253, 254, 255, 256,
    257, 258, 259, 260, 261, 262, 263, 264, 265, 266, 109, 110,
    267, 268, 269, 270, 271, 272, 273, 274, 275, 276, 277, 278,
    279, 280, 281, 282, 283, 284, 285, 286, 287, 288, 289, 290,
    291, 292, 293, 294, 295, 296, 297, 298, 299, 300, 301, 302,
    303, 304, 305, 306, 307, 308, 309, 310, 311, 312, 313, 314,
    315, 316, 317, 318, 158, 155, 163, 319, 320, 321, 322, 323,
    324, 325, 326, 150, 164, 169, 327, 328, 329, 330, 331, 332,
    333, 334, 335, 336, 337, 338, 339, 340, 341, 342, 343, 344,
    345, 346, 347, 348, 349, 350, 351, 352, 353, 354, 355, 356,
    357, 358, 359, 360, 361, 362, 363, 364, 365, 366, 367, 368,
    369, 370, 371, 372, 373, 374, 375, 376, 377, 378,
];

/// The predefined Expert Subset charset, one string ID per glyph.
pub(crate) const EXPERT_SUBSET_CHARSET: [u16; 87] = [
    0, 1, 231, 232, 235, 236, 237, 238, 13, 14, 15, 99,
    239, 240, 241, 242, 243, 244, 245, 246, 247, 248, 27, 28,
    249, 250, 251, 253, 254, 255, 256, 257, 258, 259, 260, 261,
    262, 263, 264, 265, 266, 109, 110, 267, 268, 269, 270, 272,
    300, 301, 302, 305, 314, 315, 158, 155, 163, 320, 321, 322,
    323, 324, 325, 326, 150, 164, 169, 327, 328, 329, 330, 331,
    332, 333, 334, 335, 336, 337, 338, 339, 340, 341, 342, 343,
    344, 345, 346,
];
