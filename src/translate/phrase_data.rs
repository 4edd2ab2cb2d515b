//! Built-in phrase tables: the curated catalogue shown to vendors and the
//! flat table of high-frequency literals. Keys keep their authored casing.

use super::phrases::{Category, PhraseEntry};

pub(super) const CATALOGUE: &[PhraseEntry] = &[
    PhraseEntry { id: "greeting_hello", category: Category::Greetings, pt: "Olá! Como posso ajudar?", en: "Hello! How can I help you?", es: "¡Hola! ¿Cómo puedo ayudarte?" },
    PhraseEntry { id: "greeting_good_morning", category: Category::Greetings, pt: "Bom dia!", en: "Good morning!", es: "¡Buenos días!" },
    PhraseEntry { id: "greeting_good_afternoon", category: Category::Greetings, pt: "Boa tarde!", en: "Good afternoon!", es: "¡Buenas tardes!" },
    PhraseEntry { id: "price_how_much", category: Category::Prices, pt: "Quanto custa?", en: "How much does it cost?", es: "¿Cuánto cuesta?" },
    PhraseEntry { id: "price_5_reais", category: Category::Prices, pt: "Custa 5 reais", en: "It costs 5 reais", es: "Cuesta 5 reales" },
    PhraseEntry { id: "price_10_reais", category: Category::Prices, pt: "Custa 10 reais", en: "It costs 10 reais", es: "Cuesta 10 reales" },
    PhraseEntry { id: "price_discount", category: Category::Prices, pt: "Posso fazer um desconto", en: "I can give you a discount", es: "Puedo hacer un descuento" },
    PhraseEntry { id: "price_accept_card", category: Category::Prices, pt: "Aceito cartão e PIX", en: "I accept card and PIX", es: "Acepto tarjeta y PIX" },
    PhraseEntry { id: "product_coconut_water", category: Category::Products, pt: "Água de coco gelada", en: "Cold coconut water", es: "Agua de coco fría" },
    PhraseEntry { id: "product_ice_cream", category: Category::Products, pt: "Picolé de frutas", en: "Fruit popsicle", es: "Paleta de frutas" },
    PhraseEntry { id: "product_beer", category: Category::Products, pt: "Cerveja gelada", en: "Cold beer", es: "Cerveza fría" },
    PhraseEntry { id: "product_water", category: Category::Products, pt: "Água mineral", en: "Mineral water", es: "Agua mineral" },
    PhraseEntry { id: "product_snacks", category: Category::Products, pt: "Salgadinhos e petiscos", en: "Snacks and appetizers", es: "Aperitivos y bocadillos" },
    PhraseEntry { id: "product_handicraft", category: Category::Products, pt: "Artesanato local", en: "Local handicrafts", es: "Artesanía local" },
    PhraseEntry { id: "question_want_buy", category: Category::Questions, pt: "Gostaria de comprar?", en: "Would you like to buy?", es: "¿Te gustaría comprar?" },
    PhraseEntry { id: "question_cold", category: Category::Questions, pt: "Quer bem gelado?", en: "Do you want it very cold?", es: "¿Lo quieres bien frío?" },
    PhraseEntry { id: "question_flavor", category: Category::Questions, pt: "Qual sabor você prefere?", en: "Which flavor do you prefer?", es: "¿Qué sabor prefieres?" },
    PhraseEntry { id: "question_quantity", category: Category::Questions, pt: "Quantos você quer?", en: "How many do you want?", es: "¿Cuántos quieres?" },
    PhraseEntry { id: "thanks_thank_you", category: Category::Thanks, pt: "Obrigado! Volte sempre!", en: "Thank you! Come back soon!", es: "¡Gracias! ¡Vuelve pronto!" },
    PhraseEntry { id: "thanks_good_day", category: Category::Thanks, pt: "Tenha um ótimo dia!", en: "Have a great day!", es: "¡Que tengas un gran día!" },
    PhraseEntry { id: "thanks_enjoy", category: Category::Thanks, pt: "Aproveite a praia!", en: "Enjoy the beach!", es: "¡Disfruta la playa!" },
];

/// (portuguese, english, spanish)
pub(super) const PORTUGUESE_ROWS: &[(&str, &str, &str)] = &[
    ("Olá", "Hello", "Hola"),
    ("Oi", "Hi", "Hola"),
    ("Bom dia", "Good morning", "Buenos días"),
    ("Boa tarde", "Good afternoon", "Buenas tardes"),
    ("Boa noite", "Good evening", "Buenas noches"),
    ("Como vai?", "How are you?", "¿Cómo estás?"),
    ("Tudo bem?", "Everything okay?", "¿Todo bien?"),
    ("Bem-vindo", "Welcome", "Bienvenido"),
    ("Quanto custa?", "How much?", "¿Cuánto cuesta?"),
    ("Quanto é?", "How much is it?", "¿Cuánto es?"),
    ("Qual o preço?", "What's the price?", "¿Cuál es el precio?"),
    ("Tem desconto?", "Any discount?", "¿Hay descuento?"),
    ("Aceita cartão?", "Do you accept card?", "¿Aceptas tarjeta?"),
    ("Aceito cartão", "I accept card", "Acepto tarjeta"),
    ("Só dinheiro", "Cash only", "Solo efectivo"),
    ("Aceito PIX", "I accept PIX", "Acepto PIX"),
    ("Muito caro", "Too expensive", "Muy caro"),
    ("Está barato", "It's cheap", "Está barato"),
    ("Bom preço", "Good price", "Buen precio"),
    ("Posso fazer desconto", "I can give a discount", "Puedo hacer descuento"),
    ("5 reais", "5 reais", "5 reales"),
    ("10 reais", "10 reais", "10 reales"),
    ("20 reais", "20 reais", "20 reales"),
    ("50 reais", "50 reais", "50 reales"),
    ("100 reais", "100 reais", "100 reales"),
    ("Custa 5 reais", "It costs 5 reais", "Cuesta 5 reales"),
    ("Custa 10 reais", "It costs 10 reais", "Cuesta 10 reales"),
    ("Água de coco", "Coconut water", "Agua de coco"),
    ("Cerveja", "Beer", "Cerveza"),
    ("Água", "Water", "Agua"),
    ("Refrigerante", "Soda", "Refresco"),
    ("Picolé", "Popsicle", "Paleta"),
    ("Sorvete", "Ice cream", "Helado"),
    ("Salgadinho", "Snack", "Aperitivo"),
    ("Artesanato", "Handicraft", "Artesanía"),
    ("Canga", "Sarong", "Pareo"),
    ("Chapéu", "Hat", "Sombrero"),
    ("Óculos de sol", "Sunglasses", "Gafas de sol"),
    ("Protetor solar", "Sunscreen", "Protector solar"),
    ("O que é isso?", "What is this?", "¿Qué es esto?"),
    ("Tem outro tamanho?", "Do you have another size?", "¿Tienes otro tamaño?"),
    ("Tem outra cor?", "Do you have another color?", "¿Tienes otro color?"),
    ("Posso ver?", "Can I see it?", "¿Puedo verlo?"),
    ("Posso experimentar?", "Can I try it?", "¿Puedo probarlo?"),
    ("Você tem?", "Do you have?", "¿Tienes?"),
    ("Onde fica?", "Where is it?", "¿Dónde está?"),
    ("Como funciona?", "How does it work?", "¿Cómo funciona?"),
    ("Qual sabor?", "Which flavor?", "¿Qué sabor?"),
    ("Quantos você quer?", "How many do you want?", "¿Cuántos quieres?"),
    ("Gostaria de comprar?", "Would you like to buy?", "¿Te gustaría comprar?"),
    ("Sim", "Yes", "Sí"),
    ("Não", "No", "No"),
    ("Talvez", "Maybe", "Quizás"),
    ("Claro", "Sure", "Claro"),
    ("Com certeza", "Definitely", "Definitivamente"),
    ("Não sei", "I don't know", "No sé"),
    ("Espera um pouco", "Wait a moment", "Espera un momento"),
    ("Já volto", "I'll be right back", "Ya vuelvo"),
    ("Obrigado", "Thank you", "Gracias"),
    ("Muito obrigado", "Thank you very much", "Muchas gracias"),
    ("De nada", "You're welcome", "De nada"),
    ("Por favor", "Please", "Por favor"),
    ("Com licença", "Excuse me", "Disculpe"),
    ("Desculpa", "Sorry", "Lo siento"),
    ("Tchau", "Goodbye", "Adiós"),
    ("Até logo", "See you later", "Hasta luego"),
    ("Até mais", "See you", "Hasta pronto"),
    ("Volte sempre", "Come back soon", "Vuelve pronto"),
    ("Tenha um bom dia", "Have a good day", "Que tengas un buen día"),
    ("Aproveite", "Enjoy", "Disfruta"),
    ("Aproveite a praia", "Enjoy the beach", "Disfruta la playa"),
    ("À esquerda", "To the left", "A la izquierda"),
    ("À direita", "To the right", "A la derecha"),
    ("Em frente", "Straight ahead", "Todo recto"),
    ("Aqui", "Here", "Aquí"),
    ("Ali", "There", "Allí"),
    ("Perto", "Near", "Cerca"),
    ("Longe", "Far", "Lejos"),
    ("Gelado", "Cold", "Frío"),
    ("Quente", "Hot", "Caliente"),
    ("Fresco", "Fresh", "Fresco"),
    ("Novo", "New", "Nuevo"),
    ("Bom", "Good", "Bueno"),
    ("Ótimo", "Great", "Excelente"),
    ("Delicioso", "Delicious", "Delicioso"),
    ("Bonito", "Beautiful", "Bonito"),
    ("Olá! Como posso ajudar?", "Hello! How can I help you?", "¡Hola! ¿Cómo puedo ayudarte?"),
    ("Quer bem gelado?", "Do you want it very cold?", "¿Lo quieres bien frío?"),
    ("Qual sabor você prefere?", "Which flavor do you prefer?", "¿Qué sabor prefieres?"),
    ("Aceito cartão e PIX", "I accept card and PIX", "Acepto tarjeta y PIX"),
    ("Obrigado! Volte sempre!", "Thank you! Come back soon!", "¡Gracias! ¡Vuelve pronto!"),
    ("Tenha um ótimo dia!", "Have a great day!", "¡Que tengas un gran día!"),
    ("Está muito quente hoje", "It's very hot today", "Hace mucho calor hoy"),
    ("A praia está linda", "The beach is beautiful", "La playa está hermosa"),
    ("Feito à mão", "Handmade", "Hecho a mano"),
    ("Produto local", "Local product", "Producto local"),
];

/// (english, portuguese, spanish)
pub(super) const ENGLISH_ROWS: &[(&str, &str, &str)] = &[
    ("Hello", "Olá", "Hola"),
    ("How much?", "Quanto custa?", "¿Cuánto cuesta?"),
    ("Thank you", "Obrigado", "Gracias"),
    ("Yes", "Sim", "Sí"),
    ("No", "Não", "No"),
    ("Goodbye", "Tchau", "Adiós"),
    ("Please", "Por favor", "Por favor"),
    ("Sorry", "Desculpa", "Lo siento"),
    ("Good morning", "Bom dia", "Buenos días"),
    ("How are you?", "Como vai?", "¿Cómo estás?"),
];

/// (spanish, portuguese, english)
pub(super) const SPANISH_ROWS: &[(&str, &str, &str)] = &[
    ("Hola", "Olá", "Hello"),
    ("¿Cuánto cuesta?", "Quanto custa?", "How much?"),
    ("Gracias", "Obrigado", "Thank you"),
    ("Sí", "Sim", "Yes"),
    ("No", "Não", "No"),
    ("Adiós", "Tchau", "Goodbye"),
    ("Por favor", "Por favor", "Please"),
    ("Lo siento", "Desculpa", "Sorry"),
    ("Buenos días", "Bom dia", "Good morning"),
    ("¿Cómo estás?", "Como vai?", "How are you?"),
];

