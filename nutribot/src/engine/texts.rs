//! User-facing reply texts, fixed strings sent through the chat transport.

pub const START: &str = "Hello! I am NomNom NutriBot. I can help you track your nutrition. \
     Type /help to see the list of commands.";

pub const HELP: &str = "List of commands:\n\
     /start - Start the bot\n\
     /help - Show this message\n\
     /track - Track your meal\n\
     /view - View your meal history\n\
     /delete - Delete your meal history\n\
     /cancel - Cancel the current operation";

pub const TRACK_PROMPT: &str = "What did you eat? Please describe your meal or upload an image.";
pub const SAVE_PROMPT: &str = "Would you like to save this meal? (yes/no)";
pub const MEAL_SAVED: &str = "Meal saved successfully.";
pub const MEAL_NOT_SAVED: &str = "Meal not saved.";

pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete your meal history? Type \"yes\" to confirm.";
pub const NOTHING_TO_DELETE: &str = "You have no meal history to delete.";
pub const HISTORY_DELETED: &str = "Your meal history has been deleted.";
pub const DELETE_CANCELLED: &str = "Delete operation cancelled.";

pub const CANCELLED: &str = "Operation cancelled.";
pub const EMPTY_HISTORY: &str = "You have not tracked any meals yet.";

pub const ADVICE_UNAVAILABLE: &str =
    "Meal tracked, but unable to fetch nutritional advice at the moment.";
pub const NO_FOOD_FOUND: &str = "No recognizable food items found in the image.";
pub const ANALYSIS_UNAVAILABLE: &str = "Unable to analyze the image at the moment.";

pub const GREETING: &str = "Hello There!";
pub const FAREWELL: &str = "Goodbye!";
pub const SMALLTALK_FALLBACK: &str = "I am fine, thank you!";
pub const NOT_UNDERSTOOD: &str = "I do not understand that command";
