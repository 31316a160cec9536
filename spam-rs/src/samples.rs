//! Example messages offered by the interactive surfaces

/// Fixed example list; the first entry is deliberately blank
pub const SAMPLE_MESSAGES: [&str; 7] = [
    "         ",
    "Hey John I hope this message finds you well. I wanted to follow up on our conversation from yesterday regarding the upcoming project. I've gone over the details you provided, and I believe we have a solid plan in place.I just wanted to confir",
    "Urgent! Please call 09061213237 from a landline. £5000 cash or a luxury holiday await you!",
    "Congratulations! You've won a guaranteed £1000 cash or a £2000 prize. Text WIN to 123456.",
    "Hello, how are you?",
    "Meeting at 3 pm tomorrow.",
    "Reminder: Your appointment is at 10 am.",
];

/// Look up an example by index
pub fn sample(index: usize) -> Option<&'static str> {
    SAMPLE_MESSAGES.get(index).copied()
}
