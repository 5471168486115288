//! Built-in seed riddles so the app is usable without an external bank.

use crate::domain::Riddle;

fn seed(
  id: &str,
  question_text: &str,
  question_answer: &str,
  location: &str,
  tags: &[&str],
  established_at: Option<&str>,
  near_spots: Option<&[&str]>,
  short_def: Option<&str>,
) -> Riddle {
  Riddle {
    id: id.into(),
    question_text: question_text.into(),
    question_answer: question_answer.into(),
    location: location.into(),
    tags: tags.iter().map(|t| t.to_string()).collect(),
    established_at: established_at.map(Into::into),
    near_spots: near_spots.map(|s| s.iter().map(|x| x.to_string()).collect()),
    short_def: short_def.map(Into::into),
    image: None,
  }
}

/// Minimal bilmece set covering several locations and tags, enough for a
/// full-length quiz and meaningful browse filters out of the box.
pub fn seed_riddles() -> Vec<Riddle> {
  vec![
    seed(
      "b-galata",
      "Boğaz'a bakan taş nöbetçiyim; Cenevizliler dikti beni, şehri tepeden izlerim. Neyim ben?",
      "Galata Kulesi",
      "İstanbul",
      &["kule", "tarihi"],
      Some("1348"),
      Some(&["Karaköy", "İstiklal Caddesi"]),
      Some("Ceneviz kolonisi döneminden kalma ortaçağ kulesi."),
    ),
    seed(
      "b-ayasofya",
      "Bin beş yüz yıldır ayaktayım; önce kilise, sonra cami, bir ara müze oldum. Neyim ben?",
      "Ayasofya",
      "İstanbul",
      &["cami", "tarihi", "unesco"],
      Some("537"),
      Some(&["Sultanahmet", "Topkapı Sarayı"]),
      Some("Bizans döneminin en büyük mabedi."),
    ),
    seed(
      "b-kapadokya",
      "Rüzgâr ve yağmur yonttu bacalarımı; balonlar şafakta üstümde süzülür. Neresiyim?",
      "Kapadokya",
      "Nevşehir",
      &["doğa", "unesco"],
      None,
      Some(&["Göreme", "Ürgüp", "Uçhisar"]),
      Some("Peri bacalarıyla ünlü volkanik bölge."),
    ),
    seed(
      "b-pamukkale",
      "Pamuk değilim ama bembeyazım; sıcak sular basamaklarımdan akar. Neresiyim?",
      "Pamukkale",
      "Denizli",
      &["doğa", "unesco"],
      None,
      Some(&["Hierapolis"]),
      Some("Kalsiyum karbonat travertenleriyle bilinen sıcak su kaynağı."),
    ),
    seed(
      "b-anitkabir",
      "Ankara'nın kalbinde bir tepedeyim; Cumhuriyet'in kurucusu bende yatar. Neyim ben?",
      "Anıtkabir",
      "Ankara",
      &["anıt", "tarihi"],
      Some("1953"),
      None,
      Some("Mustafa Kemal Atatürk'ün anıt mezarı."),
    ),
    seed(
      "b-efes",
      "Mermer caddelerimde filozoflar yürüdü; Celsus'un kitaplığı hâlâ bende durur. Neresiyim?",
      "Efes",
      "İzmir",
      &["antik", "unesco"],
      None,
      Some(&["Selçuk", "Meryem Ana Evi"]),
      Some("Antik dönemin en büyük liman kentlerinden Efes."),
    ),
  ]
}
