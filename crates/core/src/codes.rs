//! Response code catalog.
//!
//! Every API response (success or failure) carries one of these codes in the
//! `code` response header and the envelope body. Each code maps to a fixed
//! user-facing message.

use std::fmt;

use serde::{Serialize, Serializer};

macro_rules! codes {
    ($( $variant:ident => ($code:literal, $message:literal), )*) => {
        /// A response code from the catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Code {
            $( $variant, )*
        }

        impl Code {
            /// Every code in declaration order.
            pub const ALL: &'static [Code] = &[$( Code::$variant, )*];

            /// The wire representation, e.g. `"USER_LOGIN_SUCC"`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Code::$variant => $code, )*
                }
            }

            /// The user-facing message for this code.
            pub fn message(self) -> &'static str {
                match self {
                    $( Code::$variant => $message, )*
                }
            }
        }
    };
}

codes! {
    // --- Common ---
    Exception => ("EXCEPTION", "An unknown error occurred. Please try again later."),
    NoPermission => ("NO_PERMISSION", "You do not have permission."),
    InvalidRequest => ("INVALID_REQUEST", "The request could not be understood."),
    SearchNotFound => ("SEARCH_NOT_FOUND", "No results matched the search."),
    FileNotFound => ("FILE_NOT_FOUND", "The file could not be found."),
    FileStoreFail => ("FILE_STORE_FAIL", "Failed to store the file."),
    FileTypeErr => ("FILE_TYPE_ERR", "This file type is not supported."),
    FileSizeErr => ("FILE_SIZE_ERR", "The file exceeds the upload size limit."),

    // --- Access token ---
    AccessTokenVerify => ("ACCESS_TOKEN_VERIFY", "The token was verified."),
    AccessTokenExpired => ("ACCESS_TOKEN_EXPIRED", "The token has expired."),
    AccessTokenInvalid => ("ACCESS_TOKEN_INVALID", "The token is invalid."),
    AccessTokenRequire => ("ACCESS_TOKEN_REQUIRE", "A token is required."),

    // --- Login ---
    UserLoginSucc => ("USER_LOGIN_SUCC", "Logged in successfully."),
    UserLoginFail => ("USER_LOGIN_FAIL", "Login failed."),
    UserLoginAuthFail => ("USER_LOGIN_AUTH_FAIL", "The credentials are incorrect."),
    UserLoginEmailRequired => ("USER_LOGIN_EMAIL_REQUIRED", "Please enter your email."),
    UserLoginPasswordRequired => ("USER_LOGIN_PASSWORD_REQUIRED", "Please enter your password."),
    UserLoginTypeRequired => ("USER_LOGIN_TYPE_REQUIRED", "Please enter the account type."),
    UserLoginAgreeFail => (
        "USER_LOGIN_AGREE_FAIL",
        "Agreement to the terms, the privacy policy and the age requirement is needed."
    ),

    // --- Users ---
    UserNotMatch => ("USER_NOT_MATCH", "The user information does not match."),
    UserNotFound => ("USER_NOT_FOUND", "The user could not be found."),
    UserNotAdmin => ("USER_NOT_ADMIN", "Administrator permission is required."),
    UserBlocked => ("USER_BLOCKED", "This account has been restricted."),
    UserCreateSucc => ("USER_CREATE_SUCC", "Sign-up completed."),
    UserCreateFail => ("USER_CREATE_FAIL", "Sign-up failed."),
    UserCreateRequiredFields => ("USER_CREATE_REQUIRED_FIELDS", "Please fill in the required fields."),
    UserAgreePrivacyRequired => ("USER_AGREE_PRIVACY_REQUIRED", "Please agree to the privacy policy."),
    UserAgreeTermsRequired => ("USER_AGREE_TERMS_REQUIRED", "Please agree to the terms of use."),
    UserAgreeAgeRequired => ("USER_AGREE_AGE_REQUIRED", "You must be 14 or older to sign up."),
    UserTypeSucc => ("USER_TYPE_SUCC", "The account type is valid."),
    UserTypeErr => ("USER_TYPE_ERR", "The account type is not valid."),
    UserReadSucc => ("USER_READ_SUCC", "User information retrieved."),
    NicknameAlreadyExist => ("NICKNAME_ALREADY_EXIST", "This nickname is already taken."),
    EmailAlreadyExist => ("EMAIL_ALREADY_EXIST", "This email address is already registered."),
    UserUpdateSucc => ("USER_UPDATE_SUCC", "User information updated."),
    UserUpdateNicknameSucc => ("USER_UPDATE_NICKNAME_SUCC", "Nickname updated."),
    UserUpdateProfileSucc => ("USER_UPDATE_PROFILE_SUCC", "Profile updated."),
    UserUpdateProfileImageSucc => ("USER_UPDATE_PROFILE_IMAGE_SUCC", "Profile image updated."),
    UserUpdatePasswordSucc => ("USER_UPDATE_PASSWORD_SUCC", "Password updated."),
    UserUpdateIsagreeSucc => ("USER_UPDATE_ISAGREE_SUCC", "Agreement settings updated."),
    UserDeleteSucc => ("USER_DELETE_SUCC", "Account deleted."),

    // --- Field validation ---
    ValidNickSucc => ("VALID_NICK_SUCC", "This nickname is available."),
    ValidNickFail => ("VALID_NICK_FAIL", "This nickname is not valid."),
    ValidNickExist => ("VALID_NICK_EXIST", "This nickname is already taken."),
    ValidNickRequireErr => ("VALID_NICK_REQUIRE_ERR", "Please enter a nickname."),
    ValidNickLengthErr => ("VALID_NICK_LENGTH_ERR", "The nickname length is out of range."),
    ValidNickSpaceErr => ("VALID_NICK_SPACE_ERR", "The nickname cannot contain spaces."),
    ValidEmailSucc => ("VALID_EMAIL_SUCC", "This email address is available."),
    ValidEmailRequireErr => ("VALID_EMAIL_REQUIRE_ERR", "Please enter an email address."),
    ValidEmailLengthErr => ("VALID_EMAIL_LENGTH_ERR", "The email length is out of range."),
    ValidEmailPatternErr => ("VALID_EMAIL_PATTERN_ERR", "The email address is not well formed."),
    ValidPwdRequireErr => ("VALID_PWD_REQUIRE_ERR", "Please enter a password."),
    ValidPwdIncludeSpaceErr => ("VALID_PWD_INCLUDE_SPACE_ERR", "The password cannot contain spaces."),
    ValidPwdLengthErr => ("VALID_PWD_LENGTH_ERR", "The password length is out of range."),
    ValidPwdNotIncWordErr => ("VALID_PWD_NOT_INC_WORD_ERR", "The password must contain a letter."),
    ValidPwdNotIncNumberErr => ("VALID_PWD_NOT_INC_NUMBER_ERR", "The password must contain a digit."),
    ValidPwdNotIncSimbolErr => ("VALID_PWD_NOT_INC_SIMBOL_ERR", "The password must contain a symbol."),

    // --- Query parameters ---
    InvalidParamPage => ("INVALID_PARAM_PAGE", "The page number is not valid."),
    InvalidParamPageSize => ("INVALID_PARAM_PAGE_SIZE", "The page size is not valid."),
    InvalidParamKeyword => ("INVALID_PARAM_KEYWORD", "The search keyword must be at least 2 characters."),
    InvalidParamType => ("INVALID_PARAM_TYPE", "The type parameter is not valid."),
    InvalidParamOrderBy => ("INVALID_PARAM_ORDER_BY", "The sort order is not valid."),
    InvalidParamRating => ("INVALID_PARAM_RATING", "The rating must be between 0.5 and 5.0 in steps of 0.5."),
    InvalidParamBirthYear => ("INVALID_PARAM_BIRTH_YEAR", "The birth year is not valid."),

    // --- Videos ---
    VideoNotFound => ("VIDEO_NOT_FOUND", "The video could not be found."),
    VideoCreateSucc => ("VIDEO_CREATE_SUCC", "Video created."),
    VideoSearchSucc => ("VIDEO_SEARCH_SUCC", "Video search completed."),
    VideoReadSucc => ("VIDEO_READ_SUCC", "Video retrieved."),
    VideoUpdateSucc => ("VIDEO_UPDATE_SUCC", "Video updated."),
    VideoDeleteSucc => ("VIDEO_DELETE_SUCC", "Video deleted."),
    VideoViewInsertSucc => ("VIDEO_VIEW_INSERT_SUCC", "View recorded."),
    VideoLikeReadSucc => ("VIDEO_LIKE_READ_SUCC", "Like status retrieved."),
    VideoLikeToggleSucc => ("VIDEO_LIKE_TOGGLE_SUCC", "Like status changed."),
    ThumbnailCreateSucc => ("THUMBNAIL_CREATE_SUCC", "Thumbnail uploaded."),

    // --- Reviews ---
    ReviewReadListSucc => ("REVIEW_READ_LIST_SUCC", "Reviews retrieved."),
    ReviewCreateSucc => ("REVIEW_CREATE_SUCC", "Review created."),
    ReviewUpdateSucc => ("REVIEW_UPDATE_SUCC", "Review updated."),
    ReviewDeleteSucc => ("REVIEW_DELETE_SUCC", "Review deleted."),
    ReviewNotFound => ("REVIEW_NOT_FOUND", "The review could not be found."),
    ReviewNotMatch => ("REVIEW_NOT_MATCH", "The review does not belong to this video."),

    // --- Ratings ---
    RatingReadSucc => ("RATING_READ_SUCC", "Rating retrieved."),
    RatingUpdateSucc => ("RATING_UPDATE_SUCC", "Rating saved."),
    RatingDeleteSucc => ("RATING_DELETE_SUCC", "Rating removed."),
    RatingNotFound => ("RATING_NOT_FOUND", "No rating exists for this video."),

    // --- Catalog ---
    GenreReadSucc => ("GENRE_READ_SUCC", "Genres retrieved."),
    GenreCreateSucc => ("GENRE_CREATE_SUCC", "Genre created."),
    GenreAlreadyExist => ("GENRE_ALREADY_EXIST", "This genre already exists."),
    ActorReadSucc => ("ACTOR_READ_SUCC", "Actor retrieved."),
    ActorCreateSucc => ("ACTOR_CREATE_SUCC", "Actor created."),
    ActorUpdateSucc => ("ACTOR_UPDATE_SUCC", "Actor updated."),
    ActorNotFound => ("ACTOR_NOT_FOUND", "The actor could not be found."),
    StaffReadSucc => ("STAFF_READ_SUCC", "Staff member retrieved."),
    StaffCreateSucc => ("STAFF_CREATE_SUCC", "Staff member created."),
    StaffUpdateSucc => ("STAFF_UPDATE_SUCC", "Staff member updated."),
    StaffNotFound => ("STAFF_NOT_FOUND", "The staff member could not be found."),
}

impl Code {
    /// Look up a code by its wire representation.
    pub fn parse(value: &str) -> Option<Code> {
        Code::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
